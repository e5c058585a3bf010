//! Marketplace catalog ingestion.
//!
//! Pulls a shop's active listings from the marketplace, normalizes them into
//! [`CatalogItem`] records and writes them as the site's product data file.
//!
//! Two backends implement one [`CatalogIngestor`] contract:
//!
//! - [`EtsyApiIngestor`] - structured API, paged, needs an API key
//! - [`ShopPageIngestor`] - scrape of the public shop page
//!
//! Both sit on the [`Fetcher`] seam, so tests drive them with
//! [`testing::MockFetcher`] instead of the network.
//!
//! # Usage
//!
//! ```rust,ignore
//! use catalog::{build_ingestor, run_ingestion, HttpFetcher, IngestConfig};
//! use std::sync::Arc;
//!
//! let config = IngestConfig::from_env()?;
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let ingestor = build_ingestor(&config, fetcher)?;
//! let report = run_ingestion(ingestor.as_ref(), &config).await?;
//! println!("{} items -> {}", report.items, report.catalog_path.display());
//! ```
//!
//! # Modules
//!
//! - [`types`] - catalog items, site config, ingest config, API shapes
//! - [`traits`] - `Fetcher` and `CatalogIngestor`
//! - [`fetchers`] - reqwest-backed `HttpFetcher`
//! - [`ingestors`] - the two backends and strategy selection
//! - [`pipeline`] - the all-or-nothing ingestion run
//! - [`store`] - catalog data file persistence
//! - [`security`] - API key handling
//! - [`testing`] - mock implementations for testing

pub mod error;
pub mod fetchers;
pub mod ingestors;
pub mod pipeline;
pub mod security;
pub mod store;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{CatalogError, Result};
pub use fetchers::HttpFetcher;
pub use ingestors::{build_ingestor, EtsyApiIngestor, ShopPageIngestor, API_KEY_VAR};
pub use pipeline::{run_ingestion, IngestReport};
pub use security::SecretString;
pub use store::{read_catalog, write_catalog};
pub use traits::{CatalogIngestor, FetchRequest, FetchResponse, Fetcher, Method};
pub use types::{
    config::{IngestConfig, Strategy},
    item::{format_price, CatalogItem, PRICE_UNAVAILABLE},
    site::{About, SiteConfig, SiteConfigFile},
};
