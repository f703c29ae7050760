//! Handler provider boundary.
//!
//! A provider is whatever holds the user's phase handlers: a scripting
//! runtime, a plugin, or plain Rust closures ([`ClosureHandlers`]). The bridge
//! only ever talks to it through [`HandlerProvider`].

mod closures;
mod hooks;
mod profile;

pub use closures::ClosureHandlers;
pub use hooks::{Hook, HookStage, HookStatus, Hooks};
pub use profile::{PhaseStats, Profiler};

use crate::event::MouseEvent;
use crate::phase::Phase;

/// Contract between the bridge and the runtime that owns the handlers.
pub trait HandlerProvider {
    /// Names of the phases this provider implements.
    ///
    /// Queried once, before the first lifecycle call. An `Err` means the
    /// boundary is unavailable and the session cannot start.
    fn phase_names(&self) -> anyhow::Result<Vec<String>>;

    /// Runs the handler for `phase`. Returns `false` when the handler failed.
    ///
    /// Failures are reported by the provider itself (it has the context);
    /// the bridge only latches its run state.
    fn invoke(&mut self, phase: Phase, event: Option<&MouseEvent>) -> bool;

    /// Releases everything the provider holds. Called once during shutdown.
    fn shutdown(&mut self) -> anyhow::Result<()>;
}
