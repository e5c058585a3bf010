//! One ingestion run, start to persisted write or abort.
//!
//! Order matters: every check that can fail runs before the catalog file
//! is touched. Hero seeding, when enabled, loads and validates the site
//! config before the catalog write and saves it afterwards, so a failed
//! save leaves the new catalog in place with the site config unchanged.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::{CatalogError, Result};
use crate::store::write_catalog;
use crate::traits::ingestor::CatalogIngestor;
use crate::types::config::IngestConfig;
use crate::types::site::SiteConfigFile;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Name of the backend that produced the catalog
    pub ingestor: String,
    pub items: usize,
    pub catalog_path: PathBuf,
    /// True when `heroImages` was empty and got filled this run
    pub hero_seeded: bool,
    pub finished_at: DateTime<Utc>,
}

/// Ingest, validate and persist the catalog.
///
/// Nothing is written unless ingestion succeeds, enough items were found
/// and, with hero seeding on, the site config loads and has a usable
/// `heroImages` value. The catalog is written first; the seeded site config
/// second. If that second save fails the run returns the error with the new
/// catalog already on disk and the site config untouched.
pub async fn run_ingestion(
    ingestor: &dyn CatalogIngestor,
    config: &IngestConfig,
) -> Result<IngestReport> {
    info!(ingestor = ingestor.name(), "Starting catalog ingestion");

    let items = ingestor.ingest().await?;

    if items.len() < config.min_items {
        warn!(
            found = items.len(),
            expected = config.min_items,
            "Too few items, keeping previous catalog"
        );
        return Err(CatalogError::TooFewItems {
            found: items.len(),
            expected: config.min_items,
        });
    }

    // Load and edit before writing anything so a broken site config
    // aborts the run.
    let seeded_site = if config.seed_hero_images {
        let mut site = SiteConfigFile::load(&config.site_config_path)?;
        let urls = items.iter().map(|i| i.image_url.as_str());
        if site.seed_hero_images(urls, config.hero_seed_count)? {
            Some(site)
        } else {
            info!("Hero images already set, leaving site config unchanged");
            None
        }
    } else {
        None
    };

    write_catalog(&config.catalog_path, &items)?;

    let hero_seeded = match seeded_site {
        Some(site) => {
            site.save(&config.site_config_path)?;
            info!(
                path = %config.site_config_path.display(),
                count = site.hero_image_count(),
                "Seeded hero images"
            );
            true
        }
        None => false,
    };

    Ok(IngestReport {
        ingestor: ingestor.name().to_string(),
        items: items.len(),
        catalog_path: config.catalog_path.clone(),
        hero_seeded,
        finished_at: Utc::now(),
    })
}
