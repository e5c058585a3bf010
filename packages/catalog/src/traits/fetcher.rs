//! Fetcher trait: the HTTP seam under both ingestors and the contact form.
//!
//! Backends turn a [`FetchRequest`] into a [`FetchResponse`]. Transport
//! failures are errors; HTTP status codes are not, so callers decide what a
//! non-success status means. [`Fetcher::fetch_text`] is the common case
//! where anything but 2xx is an [`CatalogError::Upstream`].

use async_trait::async_trait;
use std::fmt;

use crate::error::{CatalogError, Result};

/// HTTP method subset the catalog needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outgoing request.
#[derive(Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form-encoded body fields (POST only)
    pub form: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            form: Vec::new(),
        }
    }

    pub fn post_form(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            form,
        }
    }

    /// Add a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Header values may carry credentials; only names are printed.
impl fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("FetchRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &names)
            .field("form_fields", &self.form.len())
            .finish()
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Send a request and return whatever status the server answered with.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse>;

    /// Send a request and return the body, failing on any non-2xx status.
    async fn fetch_text(&self, request: &FetchRequest) -> Result<String> {
        let response = self.fetch(request).await?;
        if !response.is_success() {
            return Err(CatalogError::Upstream {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
