//! Input subsystem.
//!
//! Platform events are translated into [`InputEvent`]s by the window's
//! listeners; [`InputState`] folds them into the sketch's input snapshot and
//! decides which lifecycle calls they produce.

pub mod platform;

mod state;
mod types;

pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, KeyState, LifecycleCall, WheelDelta};
