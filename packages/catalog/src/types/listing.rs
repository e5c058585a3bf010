//! Etsy Open API v3 response shapes.
//!
//! Only the fields the catalog needs are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

/// Paged wrapper used by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Result of `GET /shops?shop_name=…`.
#[derive(Debug, Clone, Deserialize)]
pub struct Shop {
    pub shop_id: u64,
    #[serde(default)]
    pub shop_name: Option<String>,
}

/// An active listing with its images included inline.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub listing_id: Option<u64>,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub images: Vec<ListingImage>,
}

/// Price as integer amount over divisor (e.g. 2500 / 100).
#[derive(Debug, Clone, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub divisor: i64,
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// Size variants of one listing image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingImage {
    #[serde(default)]
    pub url_fullxfull: Option<String>,
    #[serde(default, rename = "url_570xN")]
    pub url_570xn: Option<String>,
}

impl ListingImage {
    /// Highest-fidelity variant present, in priority order.
    pub fn best_url(&self) -> Option<&str> {
        [&self.url_fullxfull, &self.url_570xn]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|u| !u.is_empty())
    }
}

impl Listing {
    /// Best image URL of the first image, if any.
    pub fn primary_image_url(&self) -> Option<&str> {
        self.images.first().and_then(ListingImage::best_url)
    }
}
