//! Testing utilities including mock implementations.
//!
//! Useful for exercising ingestion and contact code without network calls.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, RwLock};

use crate::error::{CatalogError, Result};
use crate::traits::fetcher::{FetchRequest, FetchResponse, Fetcher};
use crate::traits::ingestor::CatalogIngestor;
use crate::types::item::CatalogItem;

/// Mock fetcher with canned responses keyed by exact URL.
///
/// Unknown URLs answer `404 not found`. URLs registered with
/// [`MockFetcher::with_error`] fail as if the connection dropped. Every
/// request is recorded.
///
/// ```rust
/// use catalog::testing::MockFetcher;
/// use catalog::FetchResponse;
///
/// let mock = MockFetcher::new()
///     .with_response("https://example.com/", FetchResponse::ok("<html></html>"));
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, FetchResponse>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<FetchRequest>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response for a URL.
    pub fn add_response(&self, url: impl Into<String>, response: FetchResponse) {
        self.responses.write().unwrap().insert(url.into(), response);
    }

    /// Register a response (builder pattern).
    pub fn with_response(self, url: impl Into<String>, response: FetchResponse) -> Self {
        self.add_response(url, response);
        self
    }

    /// Fail requests to a URL with a transport error (builder pattern).
    pub fn with_error(self, url: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(url.into());
        self
    }

    /// Register a 200 JSON response (builder pattern).
    pub fn with_json(self, url: impl Into<String>, body: &Value) -> Self {
        self.with_response(url, FetchResponse::ok(body.to_string()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Every request made so far, in order.
    pub fn calls(&self) -> Vec<FetchRequest> {
        self.calls.read().unwrap().clone()
    }

    /// URLs requested so far, in order.
    pub fn called_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|r| r.url).collect()
    }

    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            failing: Arc::clone(&self.failing),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        self.calls.write().unwrap().push(request.clone());

        if self.failing.read().unwrap().contains(&request.url) {
            return Err(CatalogError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                format!("connection reset by {}", request.url),
            )));
        }

        let responses = self.responses.read().unwrap();
        Ok(responses
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(404, "not found")))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock ingestor returning a fixed item list or a fixed upstream failure.
#[derive(Default, Clone)]
pub struct MockIngestor {
    items: Vec<CatalogItem>,
    fail_status: Option<u16>,
    calls: Arc<RwLock<usize>>,
}

impl MockIngestor {
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Fail every call with an upstream error of this status.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl CatalogIngestor for MockIngestor {
    async fn ingest(&self) -> Result<Vec<CatalogItem>> {
        *self.calls.write().unwrap() += 1;
        if let Some(status) = self.fail_status {
            return Err(CatalogError::Upstream {
                status,
                body: "mock failure".into(),
            });
        }
        Ok(self.items.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// JSON payload builders shaped like the Etsy API.
pub mod fixtures {
    use super::*;

    /// `GET /shops?shop_name=…` response with one shop.
    pub fn shop_found(shop_id: u64) -> Value {
        json!({ "count": 1, "results": [{ "shop_id": shop_id, "shop_name": "HeartfeltDesigns1" }] })
    }

    /// `GET /shops?shop_name=…` response with no match.
    pub fn shop_missing() -> Value {
        json!({ "count": 0, "results": [] })
    }

    /// One listing with a full-size image and a price of `amount / 100`.
    pub fn listing(id: u64, amount: i64) -> Value {
        json!({
            "listing_id": id,
            "title": format!("Pattern {id}"),
            "url": format!("https://www.etsy.com/listing/{id}/pattern-{id}"),
            "price": { "amount": amount, "divisor": 100, "currency_code": "CAD" },
            "images": [{
                "url_fullxfull": format!("https://i.etsystatic.com/{id}/il_fullxfull.jpg"),
                "url_570xN": format!("https://i.etsystatic.com/{id}/il_570xN.jpg")
            }]
        })
    }

    /// One listing with no images.
    pub fn listing_without_images(id: u64) -> Value {
        json!({
            "listing_id": id,
            "title": format!("Pattern {id}"),
            "url": format!("https://www.etsy.com/listing/{id}/pattern-{id}"),
            "price": { "amount": 500, "divisor": 100 },
            "images": []
        })
    }

    /// A page of `count` listings with ids starting at `first_id`.
    pub fn listings_page(first_id: u64, count: usize) -> Value {
        let results: Vec<Value> = (0..count as u64)
            .map(|i| listing(first_id + i, 1000))
            .collect();
        page(results)
    }

    /// Wrap listings in the paged envelope.
    pub fn page(results: Vec<Value>) -> Value {
        json!({ "count": 9999, "results": results })
    }
}
