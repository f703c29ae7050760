use std::path::Path;

use crate::error::BridgeResult;

/// Standalone ARGB image produced from a pixel byte buffer.
///
/// Owned by the caller; independent of the engine's pixel cache. Can be
/// exported with [`save`](Self::save).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelImage {
    /// `pixels.len()` must equal `width * height`.
    pub(crate) fn from_raw(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major packed `0xAARRGGBB` values.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn to_rgba8(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let [a, r, g, b] = self.get(x, y).unwrap_or(0).to_be_bytes();
            image::Rgba([r, g, b, a])
        })
    }

    /// Writes the image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> BridgeResult<()> {
        let path = path.as_ref();
        self.to_rgba8().save(path)?;
        log::debug!("saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
