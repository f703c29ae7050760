use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::phase::Phase;

/// Timing collected for one profiled phase handler.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PhaseStats {
    pub calls: u64,
    /// Calls that returned an error. Included in the timings.
    pub failures: u64,
    pub total: Duration,
    pub max: Duration,
}

impl PhaseStats {
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total.div_f64(self.calls as f64)
        }
    }

    fn record(&mut self, elapsed: Duration, ok: bool) {
        self.calls += 1;
        if !ok {
            self.failures += 1;
        }
        self.total += elapsed;
        self.max = self.max.max(elapsed);
    }
}

impl fmt::Display for PhaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} calls, total {:?}, mean {:?}, max {:?}",
            self.calls,
            self.total,
            self.mean(),
            self.max
        )?;
        if self.failures > 0 {
            write!(f, ", {} failed", self.failures)?;
        }
        Ok(())
    }
}

/// Per-phase handler timing.
///
/// Shared like [`Hooks`](super::Hooks): clone it out of the handler set
/// before the session starts and read the numbers whenever you like, during
/// or after the run. Only the handler itself is timed, not its hooks.
#[derive(Clone, Default)]
pub struct Profiler(Rc<RefCell<HashMap<Phase, PhaseStats>>>);

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing `phase`. Already profiled phases keep their numbers.
    pub fn profile(&self, phase: Phase) {
        self.0.borrow_mut().entry(phase).or_default();
    }

    pub fn profile_all(&self, phases: impl IntoIterator<Item = Phase>) {
        for phase in phases {
            self.profile(phase);
        }
    }

    pub fn is_profiled(&self, phase: Phase) -> bool {
        self.0.borrow().contains_key(&phase)
    }

    pub fn stats(&self, phase: Phase) -> Option<PhaseStats> {
        self.0.borrow().get(&phase).copied()
    }

    /// Zeroes every counter; the profiled phases stay selected.
    pub fn reset(&self) {
        for stats in self.0.borrow_mut().values_mut() {
            *stats = PhaseStats::default();
        }
    }

    /// Writes one `info` line per profiled phase, in lifecycle order.
    pub fn log_stats(&self) {
        let table = self.0.borrow();
        if table.is_empty() {
            log::info!("no phases profiled");
            return;
        }
        for phase in Phase::ALL {
            if let Some(stats) = table.get(&phase) {
                log::info!("profile {phase}: {stats}");
            }
        }
    }

    /// Runs `f`, timing it if `phase` is profiled.
    ///
    /// No borrow is held while `f` runs, so handlers may read the profiler.
    pub(crate) fn time<T>(&self, phase: Phase, f: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
        if !self.is_profiled(phase) {
            return f();
        }
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        if let Some(stats) = self.0.borrow_mut().get_mut(&phase) {
            stats.record(elapsed, result.is_ok());
        }
        result
    }
}
