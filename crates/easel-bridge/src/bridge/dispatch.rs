use crate::error::BridgeResult;
use crate::event::MouseEvent;
use crate::phase::Phase;
use crate::provider::HandlerProvider;
use crate::registry::HandlerSet;
use crate::shutdown::{ShutdownSequencer, TeardownReport};

use super::config::{BridgeConfig, UnregisteredDrawPolicy};
use super::lifecycle::{Engine, Lifecycle};
use super::run_state::RunState;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Session {
    Ready,
    Running,
    Exited,
}

/// Outcome of routing one phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Dispatch {
    Invoked(bool),
    Unregistered,
    Skipped,
}

/// Routes every engine lifecycle call to the user's handler set.
///
/// Rules, per phase:
/// - degraded (or already exited): per-frame phases do nothing
/// - registered: invoke the handler; a failure latches [`RunState::Degraded`]
/// - unregistered: settings/setup fall back to the engine default, draw
///   follows [`UnregisteredDrawPolicy`], everything else is skipped
///
/// `pre_draw` and `post_draw` are routed around every draw call with the same
/// rules, each checking the run state at the moment it is reached.
pub struct FrameLifecycleBridge<E, P> {
    engine: E,
    provider: P,
    handlers: HandlerSet,
    run_state: RunState,
    config: BridgeConfig,

    session: Session,
    frame_count: u64,
    teardown: Option<TeardownReport>,
}

impl<E, P> FrameLifecycleBridge<E, P>
where
    E: Engine,
    P: HandlerProvider,
{
    /// Builds the handler set from `provider`. Fails if the provider cannot be
    /// queried; nothing has been dispatched at that point.
    pub fn new(engine: E, provider: P, config: BridgeConfig) -> BridgeResult<Self> {
        let handlers = HandlerSet::build(&provider)?;
        log::info!("sketch bridge ready with {} handler(s)", handlers.len());

        Ok(Self {
            engine,
            provider,
            handlers,
            run_state: RunState::Healthy,
            config,
            session: Session::Ready,
            frame_count: 0,
            teardown: None,
        })
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn handlers(&self) -> &HandlerSet {
        &self.handlers
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable provider access, e.g. for hot reloading a handler.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Number of draw calls the engine has made.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// No lifecycle call has arrived yet.
    pub fn is_ready(&self) -> bool {
        self.session == Session::Ready
    }

    pub fn is_running(&self) -> bool {
        self.session == Session::Running
    }

    /// Shutdown has run.
    pub fn is_dead(&self) -> bool {
        self.session == Session::Exited
    }

    /// Shutdown has run and some handler failed along the way.
    pub fn is_dead_from_error(&self) -> bool {
        self.is_dead() && self.run_state.is_degraded()
    }

    /// Per-step outcome of the shutdown sequence, once it has run.
    pub fn teardown_report(&self) -> Option<&TeardownReport> {
        self.teardown.as_ref()
    }

    pub fn into_parts(self) -> (E, P) {
        (self.engine, self.provider)
    }

    fn dispatch(&mut self, phase: Phase, event: Option<&MouseEvent>) -> Dispatch {
        match self.session {
            Session::Exited => {
                log::debug!("{phase} after exit ignored");
                return Dispatch::Skipped;
            }
            Session::Ready => self.session = Session::Running,
            Session::Running => {}
        }

        if phase.is_per_frame() && self.run_state.is_degraded() {
            log::trace!("{phase} skipped: degraded");
            return Dispatch::Skipped;
        }

        if !self.handlers.contains(phase) {
            return Dispatch::Unregistered;
        }

        let ok = self.provider.invoke(phase, event);
        if self.run_state.observe(ok) {
            log::error!("{phase} handler failed; sketch interaction stopped");
        }
        Dispatch::Invoked(ok)
    }

    fn dispatch_bare(&mut self, phase: Phase) {
        self.dispatch(phase, None);
    }

    fn dispatch_draw(&mut self) {
        match self.dispatch(Phase::Draw, None) {
            Dispatch::Invoked(_) => {}
            Dispatch::Unregistered => match self.config.unregistered_draw {
                UnregisteredDrawPolicy::StopLoop => self.engine.no_loop(),
                UnregisteredDrawPolicy::DefaultDraw => self.engine.default_draw(),
            },
            Dispatch::Skipped => {
                if self.session != Session::Exited
                    && !self.handlers.contains(Phase::Draw)
                    && self.config.unregistered_draw == UnregisteredDrawPolicy::StopLoop
                {
                    self.engine.no_loop();
                }
            }
        }
    }
}

impl<E, P> Lifecycle for FrameLifecycleBridge<E, P>
where
    E: Engine,
    P: HandlerProvider,
{
    fn settings(&mut self) {
        if self.dispatch(Phase::Settings, None) == Dispatch::Unregistered {
            self.engine.default_settings();
        }
    }

    fn setup(&mut self) {
        if self.dispatch(Phase::Setup, None) == Dispatch::Unregistered {
            self.engine.default_setup();
        }
    }

    fn draw(&mut self) {
        if self.session != Session::Exited {
            self.frame_count += 1;
        }
        self.dispatch_bare(Phase::PreDraw);
        self.dispatch_draw();
        self.dispatch_bare(Phase::PostDraw);
    }

    fn mouse_pressed(&mut self) {
        self.dispatch_bare(Phase::MousePressed);
    }

    fn mouse_released(&mut self) {
        self.dispatch_bare(Phase::MouseReleased);
    }

    fn mouse_clicked(&mut self) {
        self.dispatch_bare(Phase::MouseClicked);
    }

    fn mouse_dragged(&mut self) {
        self.dispatch_bare(Phase::MouseDragged);
    }

    fn mouse_moved(&mut self) {
        self.dispatch_bare(Phase::MouseMoved);
    }

    fn mouse_entered(&mut self) {
        self.dispatch_bare(Phase::MouseEntered);
    }

    fn mouse_exited(&mut self) {
        self.dispatch_bare(Phase::MouseExited);
    }

    fn mouse_wheel(&mut self, event: &MouseEvent) {
        self.dispatch(Phase::MouseWheel, Some(event));
    }

    fn key_pressed(&mut self) {
        self.dispatch_bare(Phase::KeyPressed);
    }

    fn key_released(&mut self) {
        self.dispatch_bare(Phase::KeyReleased);
    }

    fn key_typed(&mut self) {
        self.dispatch_bare(Phase::KeyTyped);
    }

    fn exit_actual(&mut self) {
        if self.session == Session::Exited {
            log::debug!("exit_actual called twice; ignored");
            return;
        }
        self.session = Session::Exited;

        let surface = self.engine.surface();
        let report = ShutdownSequencer::new(&self.handlers, &mut self.provider).run(surface);

        if report.exit_notified() == Some(false) {
            self.run_state.observe(false);
        }
        if report.has_faults() {
            log::warn!("shutdown finished with {} fault(s)", report.faults().count());
        } else {
            log::info!("shutdown complete");
        }
        self.teardown = Some(report);
    }
}
