/// Session health latch.
///
/// Starts `Healthy`; the first failed handler invocation moves it to
/// `Degraded` for the rest of the session. There is no way back.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RunState {
    #[default]
    Healthy,
    Degraded,
}

impl RunState {
    #[inline]
    pub fn is_healthy(self) -> bool {
        self == RunState::Healthy
    }

    #[inline]
    pub fn is_degraded(self) -> bool {
        self == RunState::Degraded
    }

    /// Folds an invocation result into the latch (`self = self AND success`).
    ///
    /// Returns `true` only on the Healthy → Degraded transition.
    pub(crate) fn observe(&mut self, success: bool) -> bool {
        if success || self.is_degraded() {
            return false;
        }
        *self = RunState::Degraded;
        true
    }
}
