//! Bulk geometry submission.
//!
//! A [`GeometryBatch`] is a coordinate table; [`submit`] walks it row by row
//! and issues the matching immediate-mode call on the engine's drawing
//! surface, fanning each call out to an active recorder first.

mod batch;
mod kind;
mod recording;
mod sink;
mod submit;

pub use self::batch::GeometryBatch;
pub use self::kind::GeometryKind;
pub use self::recording::Recording;
pub use self::sink::{GeometryCall, GeometrySink, GeometryTarget, Point};
pub use self::submit::{submit, submit_to};
