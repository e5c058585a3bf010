//! Storefront site glue.
//!
//! Turns the site config and catalog data file into page fragments, and
//! submits the contact form. All network access goes through the
//! [`catalog::Fetcher`] seam.

pub mod contact;
pub mod render;

pub use contact::{submit_contact, ContactForm, ContactOutcome};
pub use render::{
    escape_html, fill_template, obfuscate, paragraphs, pick_hero, render_card, render_cards,
    PageFragments, TEACHING_PARAGRAPH_STYLE,
};
