//! Ingestor implementations.
//!
//! # Available Ingestors
//!
//! - `EtsyApiIngestor` - Etsy Open API v3 (requires `ETSY_API_KEY`)
//! - `ShopPageIngestor` - HTML scrape of the public shop page
//!
//! [`build_ingestor`] picks one from [`IngestConfig::strategy`].

mod etsy_api;
mod shop_page;

pub use etsy_api::{EtsyApiIngestor, API_KEY_VAR};
pub use shop_page::ShopPageIngestor;

use std::sync::Arc;

use crate::error::Result;
use crate::traits::fetcher::Fetcher;
use crate::traits::ingestor::CatalogIngestor;
use crate::types::config::{IngestConfig, Strategy};

/// Build the backend selected by `config.strategy`.
///
/// Pre-flight checks (API key present, URLs parse) run here, so a
/// misconfigured run fails before any request is sent.
pub fn build_ingestor(
    config: &IngestConfig,
    fetcher: Arc<dyn Fetcher>,
) -> Result<Box<dyn CatalogIngestor>> {
    Ok(match config.strategy {
        Strategy::Api => Box::new(EtsyApiIngestor::new(config, fetcher)?),
        Strategy::Scrape => Box::new(ShopPageIngestor::new(config, fetcher)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::testing::MockFetcher;

    #[test]
    fn test_build_by_strategy() {
        let fetcher = Arc::new(MockFetcher::new());

        let api = IngestConfig::new().with_api_key("k");
        assert_eq!(build_ingestor(&api, fetcher.clone()).unwrap().name(), "etsy-api");

        let scrape = IngestConfig::new().with_strategy(Strategy::Scrape);
        assert_eq!(build_ingestor(&scrape, fetcher).unwrap().name(), "shop-page");
    }

    #[test]
    fn test_scrape_needs_no_key() {
        let config = IngestConfig::new().with_strategy(Strategy::Scrape);
        assert!(build_ingestor(&config, Arc::new(MockFetcher::new())).is_ok());
    }

    #[test]
    fn test_api_without_key_fails() {
        let result = build_ingestor(&IngestConfig::new(), Arc::new(MockFetcher::new()));
        assert!(matches!(result, Err(CatalogError::MissingCredential { .. })));
    }
}
