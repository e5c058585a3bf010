//! Shop page scrape backend.
//!
//! Parses the listing cards out of the public shop page. The selectors
//! below track the marketplace's current markup; if it changes they match
//! nothing and the run's minimum-item check is what notices.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::error::{CatalogError, Result};
use crate::traits::fetcher::{FetchRequest, Fetcher};
use crate::traits::ingestor::CatalogIngestor;
use crate::types::config::IngestConfig;
use crate::types::item::{prefix_price_text, CatalogItem};

const CARD_SELECTOR: &str = ".listing-link";
const CAPTION_SELECTOR: &str = ".wt-text-caption";
const PRICE_SELECTOR: &str = ".currency-value";
const IMAGE_SELECTOR: &str = "img";

/// Compiled card selectors.
struct Selectors {
    card: Selector,
    caption: Selector,
    price: Selector,
    image: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        let parse = |s: &str| {
            Selector::parse(s).map_err(|e| CatalogError::Parse(format!("selector {s}: {e}")))
        };
        Ok(Self {
            card: parse(CARD_SELECTOR)?,
            caption: parse(CAPTION_SELECTOR)?,
            price: parse(PRICE_SELECTOR)?,
            image: parse(IMAGE_SELECTOR)?,
        })
    }
}

pub struct ShopPageIngestor {
    fetcher: Arc<dyn Fetcher>,
    shop_url: String,
    origin: Url,
    user_agent: String,
    currency_prefix: String,
}

impl ShopPageIngestor {
    pub fn new(config: &IngestConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        Ok(Self {
            fetcher,
            shop_url: config.shop_url.clone(),
            origin: Url::parse(&config.origin)?,
            user_agent: config.user_agent.clone(),
            currency_prefix: config.currency_prefix.clone(),
        })
    }

    /// Extract catalog items from shop page HTML, in page order.
    pub fn parse_listings(&self, html: &str) -> Result<Vec<CatalogItem>> {
        let selectors = Selectors::new()?;
        let document = Html::parse_document(html);

        let mut items = Vec::new();
        let mut cards = 0usize;
        for card in document.select(&selectors.card) {
            cards += 1;
            match self.parse_card(card, &selectors) {
                Some(item) => items.push(item),
                None => debug!(card = cards, "Dropping incomplete listing card"),
            }
        }

        info!(cards, kept = items.len(), "Parsed shop page");
        Ok(items)
    }

    fn parse_card(&self, card: ElementRef<'_>, selectors: &Selectors) -> Option<CatalogItem> {
        let title = card
            .value()
            .attr("title")
            .map(collapse_ws)
            .filter(|t| !t.is_empty())
            .or_else(|| {
                card.select(&selectors.caption)
                    .next()
                    .map(|el| collapse_ws(&el.text().collect::<String>()))
            })
            .filter(|t| !t.is_empty())?;

        let href = card.value().attr("href").filter(|h| !h.trim().is_empty())?;
        let detail_url = self.canonical_url(href)?;

        let price_text = card
            .select(&selectors.price)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        let image = card.select(&selectors.image).next();
        let image_url = image
            .and_then(|img| {
                let attrs = img.value();
                attrs
                    .attr("src")
                    .filter(|s| !s.trim().is_empty())
                    .or_else(|| attrs.attr("data-src"))
            })
            .and_then(|src| self.absolute_url(src))?;

        let item = CatalogItem::new(title, detail_url, image_url)
            .with_price(prefix_price_text(&self.currency_prefix, &price_text));
        item.is_complete().then_some(item)
    }

    /// Resolve against the origin and drop query and fragment.
    pub fn canonical_url(&self, href: &str) -> Option<String> {
        let mut url = self.origin.join(href.trim()).ok()?;
        url.set_query(None);
        url.set_fragment(None);
        Some(url.into())
    }

    /// Resolve a possibly relative URL against the origin.
    pub fn absolute_url(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        self.origin.join(href).ok().map(Into::into)
    }
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl CatalogIngestor for ShopPageIngestor {
    async fn ingest(&self) -> Result<Vec<CatalogItem>> {
        info!(url = %self.shop_url, "Fetching shop page");
        let request = FetchRequest::get(&self.shop_url).header("User-Agent", &self.user_agent);
        let html = self.fetcher.fetch_text(&request).await?;
        self.parse_listings(&html)
    }

    fn name(&self) -> &str {
        "shop-page"
    }
}
