//! Frame timing.
//!
//! One `FrameClock` per sketch: it paces redraws to the target rate and keeps
//! the smoothed frame rate sketches read back.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
