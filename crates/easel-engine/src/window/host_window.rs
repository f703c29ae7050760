use std::sync::Arc;

use anyhow::{Result, bail};
use winit::event::WindowEvent;
use winit::window::Window;

use easel_bridge::shutdown::{HeadlessSurface, ListenerId, ListenerKind, NativeWindow};

use super::listeners::ListenerTable;
use crate::device::Presenter;
use crate::input::InputEvent;

/// Id the presenter is reported under as the window's GPU listener.
pub const PRESENTER_LISTENER: ListenerId = 0;

/// The sketch's window, its presenter and its input listeners.
///
/// Starts without a window (headless) until [`attach`](Self::attach).
pub struct HostWindow {
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    listeners: ListenerTable,
    pixel_scale: f64,
    visible: bool,
}

impl HostWindow {
    pub fn new() -> Self {
        Self {
            window: None,
            presenter: None,
            listeners: ListenerTable::new(),
            pixel_scale: 1.0,
            visible: true,
        }
    }

    /// Takes ownership of a freshly created window and wires its listeners.
    pub fn attach(&mut self, window: Arc<Window>, presenter: Option<Presenter>, pixel_scale: f64) {
        self.visible = window.is_visible().unwrap_or(true);
        self.window = Some(window);
        self.presenter = presenter;
        self.pixel_scale = pixel_scale;
        self.listeners.attach_input_listeners();
    }

    pub fn is_open(&self) -> bool {
        self.window.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }

    pub fn presenter_mut(&mut self) -> Option<&mut Presenter> {
        self.presenter.as_mut()
    }

    pub fn listener_table(&self) -> &ListenerTable {
        &self.listeners
    }

    pub fn listener_table_mut(&mut self) -> &mut ListenerTable {
        &mut self.listeners
    }

    pub fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    /// Runs `event` through the attached listeners.
    pub fn dispatch(&mut self, event: &WindowEvent) -> Vec<InputEvent> {
        self.listeners.dispatch(event, self.pixel_scale)
    }
}

impl Default for HostWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeWindow for HostWindow {
    fn is_gpu_backed(&self) -> bool {
        self.presenter.is_some()
    }

    fn listeners(&mut self, kind: ListenerKind) -> Result<Vec<ListenerId>> {
        Ok(match kind {
            ListenerKind::GlEvent => self.presenter.iter().map(|_| PRESENTER_LISTENER).collect(),
            _ => self.listeners.ids(kind),
        })
    }

    fn detach_listener(&mut self, kind: ListenerKind, id: ListenerId) -> Result<()> {
        if kind != ListenerKind::GlEvent {
            return self.listeners.remove(kind, id);
        }
        if id != PRESENTER_LISTENER || self.presenter.take().is_none() {
            bail!("no GPU listener with id {id}");
        }
        log::debug!("presenter released");
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        let Some(window) = self.window.take() else {
            bail!("window already destroyed");
        };
        if !self.listeners.is_empty() {
            log::warn!("destroying window with {} listener(s) attached", self.listeners.len());
        }
        // The surface holds a window reference.
        self.presenter = None;
        drop(window);
        log::debug!("window destroyed");
        Ok(())
    }
}

impl HeadlessSurface for HostWindow {
    fn set_visible(&mut self, visible: bool) -> Result<()> {
        if let Some(w) = &self.window {
            w.set_visible(visible);
        }
        self.visible = visible;
        Ok(())
    }
}
