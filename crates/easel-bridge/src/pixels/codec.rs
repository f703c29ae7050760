use crate::error::{BridgeError, BridgeResult};

use super::cache::PixelCache;
use super::pixel_image::PixelImage;

const BYTES_PER_PIXEL: usize = 4;

#[inline]
fn word(chunk: &[u8]) -> u32 {
    u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
}

/// Packs pixels into bytes. Output is always `4 * pixels.len()` long.
pub fn to_bytes(pixels: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * BYTES_PER_PIXEL);
    for p in pixels {
        out.extend_from_slice(&p.to_be_bytes());
    }
    out
}

/// Unpacks bytes into pixels. The length must be a multiple of 4.
pub fn decode(bytes: &[u8]) -> BridgeResult<Vec<u32>> {
    if bytes.len() % BYTES_PER_PIXEL != 0 {
        let expected = bytes.len() - bytes.len() % BYTES_PER_PIXEL;
        return Err(BridgeError::size_mismatch(expected, bytes.len()));
    }
    Ok(bytes.chunks_exact(BYTES_PER_PIXEL).map(word).collect())
}

/// Loads the engine's pixel cache and returns it as bytes.
///
/// The cache content is whatever the engine last rendered; reading before
/// anything was drawn gives unspecified (but well-formed) pixels.
pub fn load_and_get_pixels<C>(cache: &mut C) -> Vec<u8>
where
    C: PixelCache + ?Sized,
{
    cache.load_pixels();
    to_bytes(cache.pixels())
}

/// Builds a new, independently owned image from `bytes`.
///
/// `bytes.len()` must equal `4 * width * height`.
pub fn from_bytes(bytes: &[u8], width: u32, height: u32) -> BridgeResult<PixelImage> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(BridgeError::InvalidDimensions { width, height })?;

    if bytes.len() != expected {
        return Err(BridgeError::size_mismatch(expected, bytes.len()));
    }

    let pixels = bytes.chunks_exact(BYTES_PER_PIXEL).map(word).collect();
    Ok(PixelImage::from_raw(width, height, pixels))
}

/// Overwrites the live cache with `bytes` and commits it to the display.
///
/// The length must match the cache exactly; on mismatch the cache is left
/// untouched and nothing is committed.
pub fn apply_bytes<C>(cache: &mut C, bytes: &[u8]) -> BridgeResult<()>
where
    C: PixelCache + ?Sized,
{
    let expected = cache.pixels().len() * BYTES_PER_PIXEL;
    if bytes.len() != expected {
        return Err(BridgeError::size_mismatch(expected, bytes.len()));
    }

    for (dst, chunk) in cache
        .pixels_mut()
        .iter_mut()
        .zip(bytes.chunks_exact(BYTES_PER_PIXEL))
    {
        *dst = word(chunk);
    }
    cache.update_pixels();
    Ok(())
}
