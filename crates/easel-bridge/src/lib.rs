//! Easel lifecycle bridge.
//!
//! The host engine drives a fixed lifecycle (settings, setup, draw, input,
//! exit) and owns the window. This crate is the piece in between: it learns
//! which phases have a user handler, dispatches each engine call to that
//! handler, latches a degraded run state when a handler fails, and tears the
//! native window down in a safe order at exit.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`phase`] | `Phase`, the fixed set of lifecycle phases |
//! | [`event`] | `MouseEvent` and friends passed to event-taking phases |
//! | [`provider`] | `HandlerProvider` boundary, closure-backed `ClosureHandlers`, hooks, profiling |
//! | [`registry`] | `HandlerSet`, built once per session |
//! | [`bridge`] | `FrameLifecycleBridge`, `RunState`, engine contracts |
//! | [`pixels`] | big-endian pixel byte codec, `PixelImage` |
//! | [`geometry`] | batched vertex submission with recorder mirroring |
//! | [`shutdown`] | `ShutdownSequencer` and per-step `TeardownReport` |
//!
//! # Quick start
//!
//! ```rust,ignore
//! let handlers = ClosureHandlers::new()
//!     .setup(|| Ok(()))
//!     .draw(|| Ok(()));
//!
//! let mut bridge = FrameLifecycleBridge::new(engine, handlers, BridgeConfig::default())?;
//! bridge.settings();
//! bridge.setup();
//! bridge.draw();
//! bridge.exit_actual();
//! ```

pub mod bridge;
pub mod error;
pub mod event;
pub mod geometry;
pub mod phase;
pub mod pixels;
pub mod provider;
pub mod registry;
pub mod shutdown;

pub use bridge::{BridgeConfig, Engine, FrameLifecycleBridge, Lifecycle, RunState, UnregisteredDrawPolicy};
pub use error::{BridgeError, BridgeResult};
pub use event::{Modifiers, MouseAction, MouseButton, MouseEvent};
pub use geometry::{GeometryBatch, GeometryCall, GeometryKind, GeometrySink, GeometryTarget, Point, Recording};
pub use phase::Phase;
pub use pixels::{PixelCache, PixelImage};
pub use provider::{ClosureHandlers, HandlerProvider, Hook, HookStatus, Hooks, PhaseStats, Profiler};
pub use registry::HandlerSet;
pub use shutdown::{ShutdownSequencer, SurfaceHandle, TeardownReport};
