use std::collections::HashMap;

use anyhow::Result;

use super::hooks::{HookStage, Hooks};
use super::profile::Profiler;
use super::HandlerProvider;
use crate::event::MouseEvent;
use crate::phase::Phase;

/// Per-phase handler signature.
enum Handler {
    Bare(Box<dyn FnMut() -> Result<()>>),
    Event(Box<dyn FnMut(&MouseEvent) -> Result<()>>),
}

/// Handler provider backed by Rust closures.
///
/// Follows the builder style of the engine's application types: register the
/// phases you care about, then hand the value to the bridge.
///
/// ```rust,ignore
/// let handlers = ClosureHandlers::new()
///     .setup(|| Ok(()))
///     .draw(move || {
///         canvas.borrow_mut().background(0xFF202020);
///         Ok(())
///     })
///     .mouse_wheel(|e| {
///         log::info!("wheel {}", e.count);
///         Ok(())
///     });
/// ```
///
/// Pre/post hooks run around a phase handler only when that phase has one.
/// A handler or hook returning `Err` is logged and reported as a failed
/// invocation. Selected handlers can be timed through [`Profiler`].
pub struct ClosureHandlers {
    handlers: HashMap<Phase, Handler>,
    hooks: Hooks,
    profiler: Profiler,
}

impl ClosureHandlers {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            hooks: Hooks::new(),
            profiler: Profiler::new(),
        }
    }

    /// Register a no-argument handler for any phase.
    ///
    /// For event-taking phases the event is simply not passed on.
    pub fn on(mut self, phase: Phase, f: impl FnMut() -> Result<()> + 'static) -> Self {
        self.handlers.insert(phase, Handler::Bare(Box::new(f)));
        self
    }

    /// Register an event-taking handler. Only valid for phases that carry an
    /// event; anything else is ignored with a warning.
    pub fn on_event(mut self, phase: Phase, f: impl FnMut(&MouseEvent) -> Result<()> + 'static) -> Self {
        if !phase.takes_event() {
            log::warn!("{phase} does not carry an event; event handler ignored");
            return self;
        }
        self.handlers.insert(phase, Handler::Event(Box::new(f)));
        self
    }

    pub fn settings(self, f: impl FnMut() -> Result<()> + 'static) -> Self {
        self.on(Phase::Settings, f)
    }

    pub fn setup(self, f: impl FnMut() -> Result<()> + 'static) -> Self {
        self.on(Phase::Setup, f)
    }

    pub fn draw(self, f: impl FnMut() -> Result<()> + 'static) -> Self {
        self.on(Phase::Draw, f)
    }

    pub fn mouse_wheel(self, f: impl FnMut(&MouseEvent) -> Result<()> + 'static) -> Self {
        self.on_event(Phase::MouseWheel, f)
    }

    pub fn exiting(self, f: impl FnMut() -> Result<()> + 'static) -> Self {
        self.on(Phase::Exiting, f)
    }

    /// Attach a pre-hook before the session starts. Same as `hooks().add_pre`.
    pub fn pre_hook(self, phase: Phase, name: impl Into<String>, hook: impl super::Hook + 'static) -> Self {
        self.hooks.add_pre(phase, name, hook);
        self
    }

    pub fn post_hook(self, phase: Phase, name: impl Into<String>, hook: impl super::Hook + 'static) -> Self {
        self.hooks.add_post(phase, name, hook);
        self
    }

    /// Time every call of the given phase handlers.
    pub fn profile(self, phases: impl IntoIterator<Item = Phase>) -> Self {
        self.profiler.profile_all(phases);
        self
    }

    pub fn profile_draw(self) -> Self {
        self.profile([Phase::Draw])
    }

    /// Shared timing table for profiled phases.
    pub fn profiler(&self) -> Profiler {
        self.profiler.clone()
    }

    /// Shared hook registry; clone it into handlers to attach hooks later.
    pub fn hooks(&self) -> Hooks {
        self.hooks.clone()
    }

    /// Swap the callable for an already registered phase while running.
    ///
    /// The bridge's handler set is fixed at session start, so reloading a
    /// phase that was not registered then has no effect on dispatch; the
    /// call returns `false` in that case and nothing is stored.
    pub fn hot_reload(&mut self, phase: Phase, f: impl FnMut() -> Result<()> + 'static) -> bool {
        let Some(slot) = self.handlers.get_mut(&phase) else {
            log::warn!("hot reload of unregistered phase {phase} ignored");
            return false;
        };
        *slot = Handler::Bare(Box::new(f));
        log::info!("{phase} handler reloaded");
        true
    }

    pub fn is_registered(&self, phase: Phase) -> bool {
        self.handlers.contains_key(&phase)
    }

    fn run(&mut self, phase: Phase, event: Option<&MouseEvent>) -> Result<()> {
        let Some(handler) = self.handlers.get_mut(&phase) else {
            return Ok(());
        };

        self.hooks.run(HookStage::Pre, phase)?;

        self.profiler.time(phase, || match (handler, event) {
            (Handler::Bare(f), _) => f(),
            (Handler::Event(f), Some(ev)) => f(ev),
            (Handler::Event(_), None) => {
                anyhow::bail!("{phase} handler expects an event but none was supplied")
            }
        })?;

        self.hooks.run(HookStage::Post, phase)
    }
}

impl Default for ClosureHandlers {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerProvider for ClosureHandlers {
    fn phase_names(&self) -> Result<Vec<String>> {
        Ok(self.handlers.keys().map(|p| p.name().to_string()).collect())
    }

    fn invoke(&mut self, phase: Phase, event: Option<&MouseEvent>) -> bool {
        match self.run(phase, event) {
            Ok(()) => true,
            Err(e) => {
                log::error!("error in {phase} handler: {e:#}");
                false
            }
        }
    }

    fn shutdown(&mut self) -> Result<()> {
        self.hooks.terminate();
        self.handlers.clear();
        log::debug!("closure handlers released");
        Ok(())
    }
}
