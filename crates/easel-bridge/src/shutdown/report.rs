use super::surface::{ListenerId, ListenerKind};

/// A teardown step that did not complete. Recorded, logged, never raised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TeardownFault {
    #[error("exit handler reported failure")]
    ExitHandler,

    #[error("handler runtime shutdown failed: {0}")]
    Runtime(String),

    #[error("failed to enumerate {kind} listeners: {reason}")]
    Enumerate { kind: ListenerKind, reason: String },

    #[error("failed to detach {kind} listener {id}: {reason}")]
    Detach {
        kind: ListenerKind,
        id: ListenerId,
        reason: String,
    },

    #[error("failed to destroy native window: {0}")]
    Destroy(String),

    #[error("failed to dispose window frame: {0}")]
    Dispose(String),

    #[error("failed to hide surface: {0}")]
    Hide(String),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TeardownStep {
    ExitNotification,
    RuntimeShutdown,
    EnumerateListeners(ListenerKind),
    DetachListener(ListenerKind, ListenerId),
    DestroyWindow,
    DisposeFrame,
    HideSurface,
}

impl TeardownStep {
    /// Steps that release the surface itself.
    pub fn releases_surface(self) -> bool {
        matches!(
            self,
            TeardownStep::DestroyWindow | TeardownStep::DisposeFrame | TeardownStep::HideSurface
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: TeardownStep,
    pub result: Result<(), TeardownFault>,
}

/// Every step the shutdown sequence attempted, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    steps: Vec<StepOutcome>,
}

impl TeardownReport {
    pub(crate) fn record(&mut self, step: TeardownStep, result: Result<(), TeardownFault>) {
        if let Err(fault) = &result {
            log::warn!("teardown: {fault}");
        }
        self.steps.push(StepOutcome { step, result });
    }

    pub fn steps(&self) -> &[StepOutcome] {
        &self.steps
    }

    pub fn faults(&self) -> impl Iterator<Item = &TeardownFault> {
        self.steps.iter().filter_map(|s| s.result.as_ref().err())
    }

    pub fn has_faults(&self) -> bool {
        self.faults().next().is_some()
    }

    /// `None` when no exit handler was registered.
    pub fn exit_notified(&self) -> Option<bool> {
        self.steps
            .iter()
            .find(|s| s.step == TeardownStep::ExitNotification)
            .map(|s| s.result.is_ok())
    }

    /// How many times the surface was destroyed, disposed or hidden.
    pub fn surface_releases(&self) -> usize {
        self.steps.iter().filter(|s| s.step.releases_surface()).count()
    }

    /// Listener ids detached successfully for `kind`, in order.
    pub fn detached(&self, kind: ListenerKind) -> Vec<ListenerId> {
        self.steps
            .iter()
            .filter_map(|s| match (s.step, &s.result) {
                (TeardownStep::DetachListener(k, id), Ok(())) if k == kind => Some(id),
                _ => None,
            })
            .collect()
    }
}
