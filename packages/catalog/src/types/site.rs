//! Site configuration file (`config.json`).
//!
//! [`SiteConfig`] is the typed view the page renderer reads.
//! [`SiteConfigFile`] is the raw document an ingestion run edits when hero
//! seeding is enabled.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{CatalogError, Result};

/// About section content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    /// Bio text; paragraphs separated by blank lines
    #[serde(default)]
    pub bio: String,

    /// Portrait image URL
    #[serde(default)]
    pub photo_url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Site-wide content and contact settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default)]
    pub site_title: String,

    #[serde(default)]
    pub tagline: String,

    /// Intro shown above the product grid (trusted HTML)
    #[serde(default)]
    pub patterns_intro: String,

    #[serde(default)]
    pub about: About,

    /// Teaching text; paragraphs separated by blank lines
    #[serde(default)]
    pub teaching: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: String,

    /// Hero background candidates, one picked at random per page load
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hero_images: Vec<String>,

    /// Form endpoint the contact form posts to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_endpoint: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SiteConfig {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }
}

const HERO_IMAGES_KEY: &str = "heroImages";

/// The site config file as written by hand, for in-place edits.
///
/// Only the keys an edit touches change; everything else, including key
/// order and keys [`SiteConfig`] would fill with defaults, is written back
/// as it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfigFile {
    root: Map<String, Value>,
}

impl SiteConfigFile {
    /// Load a JSON object from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        match serde_json::from_str(text)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(CatalogError::Config(
                "site config must be a JSON object".into(),
            )),
        }
    }

    /// True when `heroImages` is absent, null or an empty list.
    ///
    /// Any other non-list value is a config error.
    pub fn hero_images_empty(&self) -> Result<bool> {
        match self.root.get(HERO_IMAGES_KEY) {
            None | Some(Value::Null) => Ok(true),
            Some(Value::Array(images)) => Ok(images.is_empty()),
            Some(other) => Err(CatalogError::Config(format!(
                "{HERO_IMAGES_KEY} must be a list, found {other}"
            ))),
        }
    }

    /// Set `heroImages` to the first `count` non-empty URLs, only when it is
    /// currently empty. Returns true when the document changed.
    pub fn seed_hero_images<'a>(
        &mut self,
        image_urls: impl IntoIterator<Item = &'a str>,
        count: usize,
    ) -> Result<bool> {
        if !self.hero_images_empty()? {
            return Ok(false);
        }
        let urls: Vec<Value> = image_urls
            .into_iter()
            .filter(|u| !u.is_empty())
            .take(count)
            .map(|u| Value::String(u.to_string()))
            .collect();
        if urls.is_empty() {
            return Ok(false);
        }
        self.root
            .insert(HERO_IMAGES_KEY.to_string(), Value::Array(urls));
        Ok(true)
    }

    /// Number of entries in `heroImages`.
    pub fn hero_image_count(&self) -> usize {
        self.root
            .get(HERO_IMAGES_KEY)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Write as pretty-printed JSON, replacing the file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.root)?;
        crate::store::write_atomic(path.as_ref(), json.as_bytes())
    }
}
