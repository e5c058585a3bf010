//! Per-pixel colour-to-alpha transform.
//!
//! Every pixel is treated as a foreground colour blended over a white
//! backdrop. The least saturated channel decides how much of the backdrop
//! shows through; the colour is then un-premultiplied against white.
//!
//! ```text
//! alpha = 255 - min(r, g, b)
//! c'    = (c - 255 * (1 - a)) / a        where a = alpha / 255
//! ```
//!
//! The input alpha channel is ignored.

use image::{DynamicImage, Rgba, RgbaImage};

/// Transform a single pixel.
///
/// Pure white becomes fully transparent (colour kept, alpha 0). Pixels with
/// at least one zero channel are returned unchanged and fully opaque.
pub fn matte_pixel(pixel: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = pixel.0;
    let richness = r.min(g).min(b);
    let alpha = 255 - richness;

    if alpha == 0 {
        return Rgba([r, g, b, 0]);
    }

    let a = f64::from(alpha) / 255.0;
    let backdrop = 255.0 * (1.0 - a);
    let unblend = |c: u8| to_byte((f64::from(c) - backdrop) / a);

    Rgba([unblend(r), unblend(g), unblend(b), alpha])
}

/// Clamp to the byte range and round half to even, like a canvas byte array.
fn to_byte(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Apply the matte to every pixel of `image` in place.
pub fn apply_matte(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        *pixel = matte_pixel(*pixel);
    }
}

/// Convert any decoded image to RGBA and return a matted copy.
pub fn matte(image: &DynamicImage) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    apply_matte(&mut rgba);
    rgba
}
