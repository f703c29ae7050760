//! CPU canvas the sketch draws into.
//!
//! Two buffers: the raster (what is displayed) and the pixel cache sketches
//! read and write through `load_pixels` / `update_pixels`. An optional
//! recorder receives every geometry call before the raster does.

pub mod color;

mod raster;
mod shape;

pub use raster::{Raster, Style};

use easel_bridge::{GeometryCall, GeometrySink, GeometryTarget, PixelCache, Recording};

#[derive(Debug, Clone)]
pub struct Canvas {
    raster: Raster,
    cache: Vec<u32>,
    recorder: Option<Recording>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, density: u32) -> Self {
        let raster = Raster::new(width, height, density);
        let cache = vec![0; raster.pixels().len()];
        Self {
            raster,
            cache,
            recorder: None,
        }
    }

    /// Reallocates both buffers; the content is reset to the default
    /// background.
    pub fn resize(&mut self, width: u32, height: u32, density: u32) {
        let style = self.raster.style;
        *self = Self::new(width, height, density);
        self.raster.style = style;
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn raster_mut(&mut self) -> &mut Raster {
        &mut self.raster
    }

    /// Issue one geometry call, mirrored to the recorder if recording.
    pub fn issue(&mut self, call: GeometryCall) {
        if let Some(rec) = self.recorder.as_mut() {
            call.apply(rec);
        }
        call.apply(&mut self.raster);
    }

    pub fn begin_record(&mut self) {
        if self.recorder.replace(Recording::new()).is_some() {
            log::debug!("begin_record restarted an active recording");
        }
    }

    pub fn end_record(&mut self) -> Option<Recording> {
        self.recorder.take()
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }
}

impl PixelCache for Canvas {
    fn load_pixels(&mut self) {
        self.cache.copy_from_slice(self.raster.pixels());
    }

    fn pixels(&self) -> &[u32] {
        &self.cache
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.cache
    }

    fn update_pixels(&mut self) {
        self.raster.pixels_mut().copy_from_slice(&self.cache);
    }
}

impl GeometryTarget for Canvas {
    fn targets(&mut self) -> (&mut dyn GeometrySink, Option<&mut dyn GeometrySink>) {
        let rec = self.recorder.as_mut().map(|r| r as &mut dyn GeometrySink);
        (&mut self.raster, rec)
    }
}
