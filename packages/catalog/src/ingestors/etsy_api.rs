//! Etsy Open API v3 backend.
//!
//! Resolves the shop id from its name, then walks the active listings in
//! fixed-size pages with images included inline. Paging stops at the first
//! empty or short page; the `count` field is never trusted.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::error::{CatalogError, Result};
use crate::security::{require_credential, SecretString};
use crate::traits::fetcher::{FetchRequest, Fetcher};
use crate::traits::ingestor::CatalogIngestor;
use crate::types::config::IngestConfig;
use crate::types::item::{format_price, CatalogItem, PRICE_UNAVAILABLE};
use crate::types::listing::{Listing, Paged, Shop};

const API_KEY_HEADER: &str = "x-api-key";

/// Environment variable the API key is read from.
pub const API_KEY_VAR: &str = "ETSY_API_KEY";

pub struct EtsyApiIngestor {
    fetcher: Arc<dyn Fetcher>,
    api_key: SecretString,
    api_base: String,
    shop_name: String,
    page_size: usize,
    currency_prefix: String,
}

impl EtsyApiIngestor {
    /// Create from config. Fails with `MissingCredential` when no API key is
    /// configured, before any request is made.
    pub fn new(config: &IngestConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let api_key = require_credential(config.api_key.as_ref(), API_KEY_VAR)?;
        if config.page_size == 0 {
            return Err(CatalogError::Config("page size must be at least 1".into()));
        }

        Ok(Self {
            fetcher,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            shop_name: config.shop_name.clone(),
            page_size: config.page_size,
            currency_prefix: config.currency_prefix.clone(),
        })
    }

    /// URL of the shop lookup request.
    pub fn shop_lookup_url(&self) -> Result<String> {
        let mut url = Url::parse(&format!("{}/shops", self.api_base))?;
        url.query_pairs_mut().append_pair("shop_name", &self.shop_name);
        Ok(url.into())
    }

    /// URL of one page of active listings.
    pub fn listings_url(&self, shop_id: u64, offset: usize) -> Result<String> {
        let mut url = Url::parse(&format!(
            "{}/shops/{}/listings/active",
            self.api_base, shop_id
        ))?;
        url.query_pairs_mut()
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("offset", &offset.to_string())
            .append_pair("includes", "Images");
        Ok(url.into())
    }

    async fn request<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        info!(url = %url, "Fetching");
        let request = FetchRequest::get(url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .header("Accept", "application/json");
        let body = self.fetcher.fetch_text(&request).await?;

        serde_json::from_str(&body)
            .map_err(|e| CatalogError::Parse(format!("unexpected response from {url}: {e}")))
    }

    /// Resolve the configured shop name to its numeric id.
    pub async fn shop_id(&self) -> Result<u64> {
        info!(shop = %self.shop_name, "Looking up shop id");
        let page: Paged<Shop> = self.request(&self.shop_lookup_url()?).await?;

        let shop = page
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::UpstreamNotFound {
                what: format!("shop {}", self.shop_name),
            })?;

        info!(shop_id = shop.shop_id, "Found shop");
        Ok(shop.shop_id)
    }

    /// Fetch every active listing, one page at a time.
    pub async fn all_listings(&self, shop_id: u64) -> Result<Vec<Listing>> {
        let mut listings = Vec::new();
        let mut offset = 0;

        loop {
            let page: Paged<Listing> = self.request(&self.listings_url(shop_id, offset)?).await?;
            let fetched = page.results.len();
            if fetched == 0 {
                break;
            }

            listings.extend(page.results);
            info!(fetched, total = listings.len(), "Fetched listings page");

            if fetched < self.page_size {
                break;
            }
            offset += self.page_size;
        }

        info!(total = listings.len(), "All listings fetched");
        Ok(listings)
    }

    /// Convert a listing, or `None` when it has no usable image or URL.
    pub fn to_item(&self, listing: &Listing) -> Option<CatalogItem> {
        let Some(image_url) = listing.primary_image_url() else {
            debug!(listing_id = ?listing.listing_id, "Dropping listing without image");
            return None;
        };

        let price = listing
            .price
            .as_ref()
            .map(|p| format_price(&self.currency_prefix, p.amount, p.divisor))
            .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());

        let item = CatalogItem::new(&listing.title, &listing.url, image_url).with_price(price);
        item.is_complete().then_some(item)
    }
}

#[async_trait]
impl CatalogIngestor for EtsyApiIngestor {
    async fn ingest(&self) -> Result<Vec<CatalogItem>> {
        let shop_id = self.shop_id().await?;
        let listings = self.all_listings(shop_id).await?;

        let items: Vec<CatalogItem> = listings.iter().filter_map(|l| self.to_item(l)).collect();
        info!(
            listings = listings.len(),
            kept = items.len(),
            "Transformed listings"
        );
        Ok(items)
    }

    fn name(&self) -> &str {
        "etsy-api"
    }
}
