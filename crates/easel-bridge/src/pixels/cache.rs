/// The engine's live pixel cache.
///
/// The cache is not kept in sync with the display automatically: call
/// [`load_pixels`](Self::load_pixels) before reading and
/// [`update_pixels`](Self::update_pixels) after writing.
pub trait PixelCache {
    /// Copy the current display contents into the cache.
    fn load_pixels(&mut self);

    fn pixels(&self) -> &[u32];

    fn pixels_mut(&mut self) -> &mut [u32];

    /// Commit the cache back to the display surface.
    fn update_pixels(&mut self);
}
