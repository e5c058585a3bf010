//! Typed errors for the catalog library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Every variant is
//! terminal for an ingestion run: nothing is retried and nothing is written.

use thiserror::Error;

/// Errors that can occur during ingestion, persistence or contact submission.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required environment value is absent
    #[error("missing credential: {name} must be set")]
    MissingCredential { name: String },

    /// Shop or resource lookup returned no result
    #[error("not found: {what}")]
    UpstreamNotFound { what: String },

    /// Marketplace answered with a non-success status
    #[error("upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Transport-level failure (DNS, TLS, connection, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response had an unexpected shape
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL could not be parsed or joined
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Fewer items than the configured minimum; likely upstream markup drift
    #[error("expected at least {expected} items, found {found}")]
    TooFewItems { found: usize, expected: usize },

    /// Configuration value could not be interpreted
    #[error("config error: {0}")]
    Config(String),

    /// File system access failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
