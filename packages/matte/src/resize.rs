//! Fit a matted logo to a fixed display height.

use image::{imageops, imageops::FilterType, RgbaImage};

/// Default on-screen logo height in pixels.
pub const DEFAULT_TARGET_HEIGHT: u32 = 80;

/// Resize to `height` pixels tall, keeping the aspect ratio.
///
/// A zero target, an empty image, or an image already at the target height
/// is returned unchanged.
pub fn fit_height(image: &RgbaImage, height: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if height == 0 || w == 0 || h == 0 || h == height {
        return image.clone();
    }

    let width = ((u64::from(w) * u64::from(height) + u64::from(h) / 2) / u64::from(h)).max(1);
    tracing::debug!(from_w = w, from_h = h, to_w = width, to_h = height, "Resizing logo");

    imageops::resize(image, width as u32, height, FilterType::Lanczos3)
}
