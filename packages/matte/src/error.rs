//! Typed errors for matte file processing.
//!
//! The pixel filter is total and never fails; only decoding, encoding and
//! file access can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while processing an image file.
#[derive(Debug, Error)]
pub enum MatteError {
    /// Decoding or encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// File system access failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format cannot carry an alpha channel
    #[error("output format does not support transparency: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Result type alias for matte operations.
pub type Result<T> = std::result::Result<T, MatteError>;
