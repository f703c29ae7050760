use easel_bridge::{Engine, SurfaceHandle};

use crate::canvas::color;
use crate::device::SurfaceErrorAction;
use crate::sketch::SketchHandle;
use crate::window::HostWindow;

/// The engine side of the bridge: sketch state plus its window.
pub struct HostEngine {
    sketch: SketchHandle,
    window: HostWindow,
}

impl HostEngine {
    pub fn new(sketch: SketchHandle) -> Self {
        Self {
            sketch,
            window: HostWindow::new(),
        }
    }

    pub fn sketch(&self) -> &SketchHandle {
        &self.sketch
    }

    pub fn window(&self) -> &HostWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut HostWindow {
        &mut self.window
    }

    /// Shows the current display buffer. A no-op without a presenter.
    pub fn present(&mut self) -> Result<(), SurfaceErrorAction> {
        let Some(presenter) = self.window.presenter_mut() else {
            return Ok(());
        };
        self.sketch.with_display(|pixels, w, h| presenter.present(pixels, w, h))
    }
}

impl Engine for HostEngine {
    fn default_settings(&mut self) {
        log::debug!(
            "no settings handler; canvas stays {}x{}",
            self.sketch.width(),
            self.sketch.height()
        );
    }

    fn default_setup(&mut self) {
        self.sketch.background(color::DEFAULT_BACKGROUND);
    }

    fn default_draw(&mut self) {}

    fn no_loop(&mut self) {
        log::debug!("draw loop stopped");
        self.sketch.no_loop();
    }

    fn surface(&mut self) -> SurfaceHandle<'_> {
        if self.window.is_open() {
            SurfaceHandle::Native(&mut self.window)
        } else {
            SurfaceHandle::Headless(&mut self.window)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_bridge::{BridgeConfig, ClosureHandlers, FrameLifecycleBridge, Lifecycle};

    #[test]
    fn headless_session_runs_and_hides_the_surface() {
        let sketch = SketchHandle::new(4, 4);
        let handlers = ClosureHandlers::new().draw({
            let s = sketch.clone();
            move || {
                s.background(color::BLACK);
                s.stroke(color::WHITE);
                s.point(1.0, 1.0);
                Ok(())
            }
        });

        let mut bridge =
            FrameLifecycleBridge::new(HostEngine::new(sketch.clone()), handlers, BridgeConfig::default()).unwrap();
        bridge.settings();
        bridge.setup();
        bridge.draw();
        bridge.exit_actual();

        assert!(bridge.is_dead());
        assert!(!bridge.engine().window().is_visible());
        sketch.with_display(|px, w, _| {
            assert_eq!(px[w as usize + 1], color::WHITE);
            assert_eq!(px[0], color::BLACK);
        });
    }

    #[test]
    fn missing_draw_handler_stops_the_loop() {
        let sketch = SketchHandle::new(2, 2);
        let mut bridge = FrameLifecycleBridge::new(
            HostEngine::new(sketch.clone()),
            ClosureHandlers::new().setup(|| Ok(())),
            BridgeConfig::default(),
        )
        .unwrap();
        bridge.draw();
        assert!(!sketch.is_looping());
    }

    #[test]
    fn default_setup_paints_the_default_background() {
        let sketch = SketchHandle::new(2, 2);
        sketch.background(color::WHITE);
        let mut bridge =
            FrameLifecycleBridge::new(HostEngine::new(sketch.clone()), ClosureHandlers::new(), BridgeConfig::default())
                .unwrap();
        bridge.setup();
        sketch.with_display(|px, _, _| assert!(px.iter().all(|&p| p == color::DEFAULT_BACKGROUND)));
    }
}
