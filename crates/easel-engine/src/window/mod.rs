//! Window + runtime loop.
//!
//! Owns the `winit` event loop and drives the lifecycle bridge from it.

mod host_window;
mod listeners;
mod runtime;

pub use host_window::{HostWindow, PRESENTER_LISTENER};
pub use listeners::{EventListener, KeyListener, ListenerTable, MouseListener, WindowStateListener};
pub use runtime::{Runtime, RuntimeConfig, SessionEnd};
