use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    pub now: Instant,

    /// Zero for the first tick.
    pub frame_index: u64,

    /// Smoothed frames per second after this tick.
    pub frame_rate: f32,
}

/// Paces draws to a target rate and tracks the achieved rate.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// produce a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    next_due: Instant,
    frame_index: u64,
    period: Option<Duration>,
    frame_rate: f32,
    dt_min: Duration,
    dt_max: Duration,
}

/// Weight of the newest sample in the smoothed rate.
const RATE_SMOOTHING: f32 = 0.05;

impl FrameClock {
    /// `target_fps <= 0` means "as fast as the loop spins".
    pub fn new(target_fps: f32) -> Self {
        let now = Instant::now();
        let period = (target_fps > 0.0).then(|| Duration::from_secs_f32(1.0 / target_fps));
        Self {
            last: now,
            next_due: now,
            frame_index: 0,
            period,
            frame_rate: if target_fps > 0.0 { target_fps } else { 60.0 },
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    pub fn with_clamps(target_fps: f32, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            dt_min,
            dt_max,
            ..Self::new(target_fps)
        }
    }

    pub fn set_target(&mut self, target_fps: f32) {
        self.period = (target_fps > 0.0).then(|| Duration::from_secs_f32(1.0 / target_fps));
        self.next_due = self.last;
    }

    /// Restart timing, e.g. after the loop was paused.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.next_due = self.last;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// When the next frame should be drawn.
    pub fn next_deadline(&self) -> Instant {
        self.next_due
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        if self.frame_index > 0 {
            let instant = 1.0 / dt.as_secs_f32();
            self.frame_rate += (instant - self.frame_rate) * RATE_SMOOTHING;
        }

        // Schedule from the previous deadline to avoid drift; resync if we
        // fell more than one period behind.
        if let Some(period) = self.period {
            self.next_due += period;
            if self.next_due < now {
                self.next_due = now + period;
            }
        } else {
            self.next_due = now;
        }

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
            frame_rate: self.frame_rate,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}
