//! Frame capture: numbered file names and stock draw hooks that save or
//! grab frames while the sketch runs.

mod filename;
mod hooks;

pub use filename::{insert_frame, insert_frame_path};
pub use hooks::{Capture, GrabFramesHook, SaveFramesHook, ScreenshotHook};
