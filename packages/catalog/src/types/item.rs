//! Catalog item record as persisted to the data file.

use serde::{Deserialize, Serialize};

/// Price shown when the marketplace gives none.
pub const PRICE_UNAVAILABLE: &str = "N/A";

fn unavailable_price() -> String {
    PRICE_UNAVAILABLE.to_string()
}

/// One product card in the catalog.
///
/// Field names on disk follow the display layer: `imgUrl` and `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display title
    pub title: String,

    /// Currency-prefixed display price, or [`PRICE_UNAVAILABLE`]
    #[serde(default = "unavailable_price")]
    pub price: String,

    /// Absolute URL of the primary image
    #[serde(rename = "imgUrl")]
    pub image_url: String,

    /// Absolute URL of the marketplace page
    #[serde(rename = "url")]
    pub detail_url: String,
}

impl CatalogItem {
    /// Create an item with no known price.
    pub fn new(
        title: impl Into<String>,
        detail_url: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price: unavailable_price(),
            image_url: image_url.into(),
            detail_url: detail_url.into(),
        }
    }

    /// Set the display price.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// True when every required field is present.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.image_url.trim().is_empty()
            && !self.detail_url.trim().is_empty()
    }
}

/// Format `amount / divisor` with a currency prefix.
///
/// Uses the shortest decimal that round-trips, so `2500 / 100` is `25` and
/// `1999 / 100` is `19.99`. A zero divisor yields [`PRICE_UNAVAILABLE`].
pub fn format_price(prefix: &str, amount: i64, divisor: i64) -> String {
    if divisor == 0 {
        return unavailable_price();
    }
    let value = amount as f64 / divisor as f64;
    format!("{prefix}{value}")
}

/// Prefix scraped price text, or [`PRICE_UNAVAILABLE`] when blank.
pub fn prefix_price_text(prefix: &str, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        unavailable_price()
    } else {
        format!("{prefix}{text}")
    }
}
