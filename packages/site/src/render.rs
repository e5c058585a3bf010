//! HTML fragments for the single-page site.
//!
//! Site config text is authored by the shop owner and treated as trusted
//! HTML. Catalog fields come from the marketplace and are always escaped.

use catalog::{CatalogItem, SiteConfig};
use std::fmt::Write;

/// Inline style the teaching section puts on each paragraph.
pub const TEACHING_PARAGRAPH_STYLE: &str = "margin-bottom:1.5rem";

/// Split text on blank lines and wrap each block in `<p>`.
///
/// ```rust
/// assert_eq!(site::paragraphs("One.\n\nTwo.", None), "<p>One.</p><p>Two.</p>");
/// ```
pub fn paragraphs(text: &str, style: Option<&str>) -> String {
    let open = match style {
        Some(style) => format!("<p style=\"{}\">", escape_html(style)),
        None => "<p>".to_string(),
    };
    text.split("\n\n")
        .map(|block| format!("{open}{block}</p>"))
        .collect()
}

/// Escape text for use in element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Encode every character as a numeric entity.
///
/// Browsers render it normally; naive address harvesters see no `@`.
pub fn obfuscate(text: &str) -> String {
    text.chars().fold(String::new(), |mut out, c| {
        let _ = write!(out, "&#{};", c as u32);
        out
    })
}

/// Pick one hero image uniformly at random.
pub fn pick_hero<'a>(images: &'a [String], rng: &mut fastrand::Rng) -> Option<&'a str> {
    if images.is_empty() {
        return None;
    }
    Some(images[rng.usize(..images.len())].as_str())
}

/// One product card.
pub fn render_card(item: &CatalogItem) -> String {
    let title = escape_html(&item.title);
    format!(
        r#"<div class="pattern-card">
  <img src="{img}" alt="{title}" class="pattern-img" loading="lazy">
  <div class="pattern-info">
    <h3>{title}</h3>
    <div class="pattern-footer">
      <span class="pattern-price">{price}</span>
      <a href="{url}" class="buy-btn">View on Etsy</a>
    </div>
  </div>
</div>
"#,
        img = escape_html(&item.image_url),
        price = escape_html(&item.price),
        url = escape_html(&item.detail_url),
    )
}

/// Product grid contents, one card per item in catalog order.
pub fn render_cards(items: &[CatalogItem]) -> String {
    items.iter().map(render_card).collect()
}

/// Rendered values for every template slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFragments {
    pub site_title: String,
    pub tagline: String,
    pub patterns_intro: String,
    pub about_photo: String,
    pub about_bio: String,
    pub teaching: String,
    /// `mailto:` link with the address entity-encoded, empty without an email
    pub email: String,
    pub phone: String,
    pub year: String,
    /// `background-image` declaration, empty without hero images
    pub hero_style: String,
    pub pattern_grid: String,
    pub contact_endpoint: String,
}

impl PageFragments {
    /// Render every fragment from the site config and catalog.
    pub fn build(
        config: &SiteConfig,
        items: &[CatalogItem],
        rng: &mut fastrand::Rng,
        year: i32,
    ) -> Self {
        let hero_style = pick_hero(&config.hero_images, rng)
            .map(|url| format!("background-image: url('{}')", escape_html(url)))
            .unwrap_or_default();

        let email = config
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .map(|e| {
                let encoded = obfuscate(e.trim());
                format!(r#"<a href="{}{encoded}">{encoded}</a>"#, obfuscate("mailto:"))
            })
            .unwrap_or_default();

        Self {
            site_title: escape_html(&config.site_title),
            tagline: escape_html(&config.tagline),
            patterns_intro: config.patterns_intro.clone(),
            about_photo: escape_html(&config.about.photo_url),
            about_bio: paragraphs(&config.about.bio, None),
            teaching: paragraphs(&config.teaching, Some(TEACHING_PARAGRAPH_STYLE)),
            email,
            phone: escape_html(&config.phone),
            year: year.to_string(),
            hero_style,
            pattern_grid: render_cards(items),
            contact_endpoint: escape_html(config.contact_endpoint.as_deref().unwrap_or_default()),
        }
    }

    /// Value for a template slot name, `None` for unknown names.
    pub fn slot(&self, name: &str) -> Option<&str> {
        let value = match name {
            "siteTitle" => &self.site_title,
            "tagline" => &self.tagline,
            "patternsIntro" => &self.patterns_intro,
            "aboutPhoto" => &self.about_photo,
            "aboutBio" => &self.about_bio,
            "teaching" => &self.teaching,
            "email" => &self.email,
            "phone" => &self.phone,
            "year" => &self.year,
            "heroStyle" => &self.hero_style,
            "patternGrid" => &self.pattern_grid,
            "contactEndpoint" => &self.contact_endpoint,
            _ => return None,
        };
        Some(value)
    }
}

/// Replace `{{name}}` slots with fragment values.
///
/// Unknown slots and unterminated `{{` are left in place.
pub fn fill_template(template: &str, fragments: &PageFragments) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = after[..end].trim();
        match fragments.slot(name) {
            Some(value) => out.push_str(value),
            None => {
                tracing::warn!(slot = name, "Unknown template slot");
                out.push_str(&rest[start..start + 2 + end + 2]);
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}
