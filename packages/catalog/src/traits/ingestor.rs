//! Ingestor trait for pluggable catalog backends.
//!
//! Both backends produce the same ordered `CatalogItem` list; the run
//! pipeline neither knows nor cares which one it was handed.
//!
//! ```rust,ignore
//! use catalog::{build_ingestor, IngestConfig, HttpFetcher};
//!
//! let config = IngestConfig::from_env()?;
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let ingestor = build_ingestor(&config, fetcher)?;
//! let items = ingestor.ingest().await?;
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::item::CatalogItem;

#[async_trait]
pub trait CatalogIngestor: Send + Sync {
    /// Fetch the shop's current listings, in marketplace order.
    ///
    /// Returned items are complete (title, image and detail URL present).
    /// Any failure aborts the whole call; partial results are never returned.
    async fn ingest(&self) -> Result<Vec<CatalogItem>>;

    /// Get the ingestor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
