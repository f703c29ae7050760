use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use easel_bridge::{BridgeConfig, FrameLifecycleBridge, HandlerProvider, Lifecycle, TeardownReport};

use crate::device::{GpuInit, Presenter};
use crate::engine::HostEngine;
use crate::sketch::SketchHandle;
use crate::time::FrameClock;

/// Window/runtime configuration.
///
/// Size and density are applied to the sketch before `settings` runs, so a
/// settings handler can still override them.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub pixel_density: u32,
    /// Target draw rate; `0` draws as fast as the loop spins.
    pub target_fps: f32,
    /// `false` keeps the window hidden (offscreen rendering).
    pub visible: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            width: 640,
            height: 480,
            pixel_density: 1,
            target_fps: 60.0,
            visible: true,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone)]
pub struct SessionEnd {
    pub frame_count: u64,
    /// Some handler failed during the session.
    pub dead_from_error: bool,
    pub teardown: Option<TeardownReport>,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs one sketch session to completion.
    ///
    /// `settings` runs before the window exists, `setup` right after it is
    /// created. Returns once the window is closed or the sketch exits.
    pub fn run<P>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        bridge_config: BridgeConfig,
        sketch: SketchHandle,
        provider: P,
    ) -> Result<SessionEnd>
    where
        P: HandlerProvider + 'static,
    {
        sketch.size(config.width, config.height);
        sketch.pixel_density(config.pixel_density);
        sketch.set_frame_rate(config.target_fps);

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let bridge = FrameLifecycleBridge::new(HostEngine::new(sketch.clone()), provider, bridge_config)
            .context("failed to start sketch session")?;
        let mut app = SketchApp::new(config, gpu_init, bridge);

        app.bridge.settings();
        app.sync_frame_rate();

        event_loop
            .run_app(&mut app)
            .context("winit event loop terminated with error")?;

        if !app.bridge.is_dead() {
            app.bridge.exit_actual();
        }
        if let Some(err) = app.fatal.take() {
            return Err(err);
        }

        Ok(SessionEnd {
            frame_count: app.bridge.frame_count(),
            dead_from_error: app.bridge.is_dead_from_error(),
            teardown: app.bridge.teardown_report().cloned(),
        })
    }
}

struct SketchApp<P>
where
    P: HandlerProvider + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    bridge: FrameLifecycleBridge<HostEngine, P>,
    clock: FrameClock,
    /// Target the clock currently paces to.
    pacing_fps: f32,
    window_id: Option<WindowId>,
    fatal: Option<anyhow::Error>,
}

impl<P> SketchApp<P>
where
    P: HandlerProvider + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, bridge: FrameLifecycleBridge<HostEngine, P>) -> Self {
        let clock = FrameClock::new(config.target_fps);
        let pacing_fps = config.target_fps;
        Self {
            config,
            gpu_init,
            bridge,
            clock,
            pacing_fps,
            window_id: None,
            fatal: None,
        }
    }

    fn sketch(&self) -> SketchHandle {
        self.bridge.engine().sketch().clone()
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let sketch = self.sketch();
        let (w, h) = sketch.pixel_size();

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(w, h))
            .with_resizable(false)
            .with_visible(self.config.visible);

        let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);
        let presenter = pollster::block_on(Presenter::new(window.clone(), self.gpu_init.clone()))
            .context("GPU initialization failed for window")?;

        self.window_id = Some(window.id());
        self.bridge
            .engine_mut()
            .window_mut()
            .attach(window, Some(presenter), sketch.density() as f64);
        sketch.mark_started();
        log::info!("sketch window {w}x{h} open");
        Ok(())
    }

    /// Handlers may change the frame rate at any time.
    fn sync_frame_rate(&mut self) {
        let fps = self.sketch().target_frame_rate();
        if fps != self.pacing_fps {
            log::debug!("frame rate target {} -> {fps}", self.pacing_fps);
            self.clock.set_target(fps);
            self.pacing_fps = fps;
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.bridge.is_dead() {
            self.bridge.exit_actual();
        }
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let sketch = self.sketch();
        if sketch.take_draw_request() {
            let ft = self.clock.tick();
            sketch.begin_frame(self.bridge.frame_count() + 1, ft.frame_rate);
            self.bridge.draw();
        }

        match self.bridge.engine_mut().present() {
            Ok(()) => {}
            Err(action) if action.is_fatal() => self.fail(event_loop, anyhow::anyhow!("{action}")),
            Err(action) => log::debug!("present: {action}"),
        }
    }

    fn handle_input(&mut self, event: &WindowEvent) {
        let sketch = self.sketch();
        let events = self.bridge.engine_mut().window_mut().dispatch(event);
        for ev in events {
            for call in sketch.apply_input(ev) {
                call.deliver(&mut self.bridge);
            }
        }
    }
}

impl<P> ApplicationHandler for SketchApp<P>
where
    P: HandlerProvider + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_id.is_some() || self.bridge.is_dead() {
            return;
        }

        if let Err(e) = self.open_window(event_loop) {
            self.fail(event_loop, e.context("failed to open sketch window"));
            return;
        }

        self.bridge.setup();
        self.clock.reset();
        self.bridge.engine().window().request_redraw();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.bridge.is_dead() {
            event_loop.exit();
            return;
        }

        let sketch = self.sketch();
        if sketch.exit_requested() {
            self.shutdown(event_loop);
            return;
        }

        if !sketch.wants_frames() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        self.sync_frame_rate();

        if self.clock.is_due(Instant::now()) {
            self.bridge.engine().window().request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window_id != Some(window_id) || self.bridge.is_dead() {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.shutdown(event_loop);
                return;
            }

            WindowEvent::Resized(size) => {
                if let Some(p) = self.bridge.engine_mut().window_mut().presenter_mut() {
                    p.resize(*size);
                }
            }

            WindowEvent::RedrawRequested => self.frame(event_loop),

            _ => self.handle_input(&event),
        }

        if self.sketch().exit_requested() && !self.bridge.is_dead() {
            self.shutdown(event_loop);
        }
    }
}
