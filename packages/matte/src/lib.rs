//! Colour-to-alpha background removal.
//!
//! Turns a logo drawn on a flat near-white background into an RGBA image
//! where the background is transparent and anti-aliased edges stay smooth
//! instead of being cut out with a hard threshold.
//!
//! # Usage
//!
//! ```rust,ignore
//! use matte::{process_file, MatteOptions};
//!
//! let result = process_file("logo.jpg", "public/logo.png", &MatteOptions::default())?;
//! println!("{}x{}", result.width, result.height);
//! ```

pub mod error;
pub mod filter;
pub mod resize;

pub use error::{MatteError, Result};
pub use filter::{apply_matte, matte, matte_pixel};
pub use resize::{fit_height, DEFAULT_TARGET_HEIGHT};

use image::ImageFormat;
use std::path::Path;

/// Options for [`process_file`].
#[derive(Debug, Clone, Default)]
pub struct MatteOptions {
    /// Resize the result to this height (aspect preserved). `None` keeps the
    /// source size.
    pub target_height: Option<u32>,
}

impl MatteOptions {
    /// Set the output height.
    pub fn with_target_height(mut self, height: u32) -> Self {
        self.target_height = Some(height);
        self
    }
}

/// Dimensions of a written image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    pub width: u32,
    pub height: u32,
}

/// Decode `input`, apply the matte, optionally resize, and write `output`.
///
/// The output format comes from the output extension and must be able to
/// store an alpha channel (PNG or WebP).
pub fn process_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &MatteOptions,
) -> Result<ProcessResult> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let format = ImageFormat::from_path(output)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::WebP) {
        return Err(MatteError::UnsupportedFormat {
            path: output.to_path_buf(),
        });
    }

    let source = image::open(input)?;
    tracing::info!(
        input = %input.display(),
        width = source.width(),
        height = source.height(),
        "Applying matte"
    );

    let mut result = matte(&source);
    if let Some(height) = options.target_height {
        result = fit_height(&result, height);
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    result.save_with_format(output, format)?;

    let (width, height) = result.dimensions();
    tracing::info!(output = %output.display(), width, height, "Wrote matted image");

    Ok(ProcessResult { width, height })
}
