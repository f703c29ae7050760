//! Whole-frame pixel exchange.
//!
//! Pixels are packed `u32` ARGB values. Across the boundary they travel as a
//! flat byte buffer, 4 bytes per pixel, big-endian (so `0xAARRGGBB` becomes
//! `[AA, RR, GG, BB]`). Conversion is a reinterpretation only; no color
//! management happens here.

mod cache;
mod codec;
mod pixel_image;

pub use self::cache::PixelCache;
pub use self::codec::{apply_bytes, decode, from_bytes, load_and_get_pixels, to_bytes};
pub use self::pixel_image::PixelImage;
