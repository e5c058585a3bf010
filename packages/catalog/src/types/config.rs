//! Ingestion configuration.
//!
//! Everything an ingestion run needs is carried in one explicit value,
//! loaded from the environment (and `.env`) by [`IngestConfig::from_env`]
//! and optionally overridden by the caller.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CatalogError, Result};
use crate::security::SecretString;

pub const DEFAULT_SHOP_NAME: &str = "HeartfeltDesigns1";
pub const DEFAULT_API_BASE: &str = "https://openapi.etsy.com/v3/application";
pub const DEFAULT_SHOP_URL: &str = "https://www.etsy.com/ca/shop/HeartfeltDesigns1";
pub const DEFAULT_ORIGIN: &str = "https://www.etsy.com";
pub const DEFAULT_CATALOG_PATH: &str = "src/data/patterns.json";
pub const DEFAULT_SITE_CONFIG_PATH: &str = "config.json";

/// Browser user agent; the marketplace rejects default HTTP clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Which backend produces the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Etsy Open API v3 (requires an API key)
    #[default]
    Api,
    /// Shop page HTML scrape
    Scrape,
}

impl FromStr for Strategy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "scrape" => Ok(Self::Scrape),
            other => Err(CatalogError::Config(format!(
                "unknown strategy '{other}' (expected api or scrape)"
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Api => "api",
            Self::Scrape => "scrape",
        })
    }
}

/// Configuration for one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub strategy: Strategy,

    /// Shop name resolved to an id by the API backend
    pub shop_name: String,

    /// API base URL, no trailing slash needed
    pub api_base: String,

    /// Etsy API key; required by [`Strategy::Api`]
    pub api_key: Option<SecretString>,

    /// Shop page fetched by the scrape backend
    pub shop_url: String,

    /// Origin relative links are resolved against
    pub origin: String,

    /// Listings per API page. Default: 100 (the API maximum).
    pub page_size: usize,

    /// Prefix for display prices. Default: `CA$`.
    pub currency_prefix: String,

    /// Catalog data file written at the end of a run
    pub catalog_path: PathBuf,

    /// Site configuration file, touched only when hero seeding is enabled
    pub site_config_path: PathBuf,

    /// Seed `heroImages` from the catalog when it is empty. Default: false.
    pub seed_hero_images: bool,

    /// How many image URLs to seed. Default: 5.
    pub hero_seed_count: usize,

    /// Abort when fewer items than this are found. Default: 1.
    pub min_items: usize,

    /// Per-request timeout. Default: 30 seconds.
    pub request_timeout: Duration,

    pub user_agent: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            shop_url: DEFAULT_SHOP_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            page_size: 100,
            currency_prefix: "CA$".to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            site_config_path: PathBuf::from(DEFAULT_SITE_CONFIG_PATH),
            seed_hero_images: false,
            hero_seed_count: 5,
            min_items: 1,
            request_timeout: Duration::from_secs(30),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl IngestConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables, reading `.env` if present.
    ///
    /// Missing variables fall back to defaults. A missing API key is not an
    /// error here; the API backend reports it before making any request.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Some(v) = var("CATALOG_STRATEGY") {
            config.strategy = v.parse()?;
        }
        if let Some(v) = var("ETSY_SHOP_NAME") {
            config.shop_name = v;
        }
        if let Some(v) = var("ETSY_API_BASE") {
            config.api_base = v;
        }
        config.api_key = var("ETSY_API_KEY").map(SecretString::from);
        if let Some(v) = var("ETSY_SHOP_URL") {
            config.shop_url = v;
        }
        if let Some(v) = var("ETSY_ORIGIN") {
            config.origin = v;
        }
        if let Some(v) = var("CURRENCY_PREFIX") {
            config.currency_prefix = v;
        }
        if let Some(v) = var("CATALOG_PATH") {
            config.catalog_path = PathBuf::from(v);
        }
        if let Some(v) = var("SITE_CONFIG_PATH") {
            config.site_config_path = PathBuf::from(v);
        }
        if let Some(v) = var("SEED_HERO_IMAGES") {
            config.seed_hero_images = parse_flag("SEED_HERO_IMAGES", &v)?;
        }
        if let Some(v) = var("HERO_SEED_COUNT") {
            config.hero_seed_count = parse_number("HERO_SEED_COUNT", &v)?;
        }
        if let Some(v) = var("MIN_CATALOG_ITEMS") {
            config.min_items = parse_number("MIN_CATALOG_ITEMS", &v)?;
        }

        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key));
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn with_shop_url(mut self, url: impl Into<String>) -> Self {
        self.shop_url = url.into();
        self
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_site_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.site_config_path = path.into();
        self
    }

    /// Opt in to seeding `heroImages` on this run.
    pub fn with_hero_seeding(mut self, enabled: bool) -> Self {
        self.seed_hero_images = enabled;
        self
    }

    pub fn with_min_items(mut self, min: usize) -> Self {
        self.min_items = min;
        self
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CatalogError::Config(format!("{name} must be a boolean, got '{value}'"))),
    }
}

fn parse_number(name: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::Config(format!("{name} must be a number, got '{value}'")))
}
