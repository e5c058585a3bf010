//! reqwest-backed fetcher.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::traits::fetcher::{FetchRequest, FetchResponse, Fetcher, Method};
use crate::types::config::IngestConfig;

/// HTTP fetcher with browser-like defaults.
///
/// Requests run one at a time in whatever order the caller awaits them;
/// the only timeout is the client-wide one.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client using the config's user agent and timeout.
    pub fn new(config: &IngestConfig) -> Result<Self> {
        Self::with_settings(&config.user_agent, config.request_timeout)
    }

    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-CA,en;q=0.5"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// Use an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        debug!(method = ?request.method, url = %request.url, "HTTP request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url).form(&request.form),
        };
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CatalogError::Config(format!("bad header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| CatalogError::Config(format!("bad header value for {name}: {e}")))?;
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(url = %request.url, error = %e, "HTTP request failed");
            CatalogError::Http(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url = %request.url, status, bytes = body.len(), "HTTP response");

        Ok(FetchResponse { status, body })
    }

    fn name(&self) -> &str {
        "http"
    }
}
