//! Shutdown sequencing.
//!
//! Order matters here: the exit notification first, then the handler
//! runtime, then the window. Listeners are always detached before the native
//! window is destroyed; destroying a window that still has listeners attached
//! crashes some windowing layers.

mod report;
mod sequencer;
mod surface;

pub use report::{StepOutcome, TeardownFault, TeardownReport, TeardownStep};
pub use sequencer::ShutdownSequencer;
pub use surface::{FramedWindow, HeadlessSurface, ListenerId, ListenerKind, NativeWindow, SurfaceHandle};
