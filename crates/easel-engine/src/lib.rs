//! Easel host engine.
//!
//! A reference host for the lifecycle bridge: a winit event loop, a wgpu
//! presenter and a CPU canvas. Handlers talk to the canvas through a
//! [`SketchHandle`]; the runtime drives the bridge. [`capture`] holds the
//! stock hooks that save or grab drawn frames.

pub mod canvas;
pub mod capture;
pub mod device;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;

mod engine;
mod sketch;

pub use engine::HostEngine;
pub use sketch::SketchHandle;
pub use window::{Runtime, RuntimeConfig, SessionEnd};
