//! Lifecycle dispatch.
//!
//! The engine drives a [`Lifecycle`]; [`FrameLifecycleBridge`] implements it
//! by forwarding each phase to the user's handler or to the engine's own
//! default ([`Engine`]). The bridge is held by the engine's runtime, not
//! derived from it.

mod config;
mod dispatch;
mod lifecycle;
mod run_state;

pub use config::{BridgeConfig, UnregisteredDrawPolicy};
pub use dispatch::FrameLifecycleBridge;
pub use lifecycle::{Engine, Lifecycle};
pub use run_state::RunState;
