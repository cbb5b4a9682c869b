use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source for frame pacing.
pub trait Clock {
    /// Elapsed time since an unspecified epoch, monotonically non-decreasing.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`], epoch at construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one handle and give
/// another to the code under test.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Throttles frame callbacks to at most one step per `min_interval`.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    min_interval: Duration,
    last_step: Option<Duration>,
}

impl FramePacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_step: None,
        }
    }

    /// Build from a millisecond interval; negative or non-finite values disable throttling.
    pub fn from_millis_f64(ms: f64) -> Self {
        let interval = if ms.is_finite() && ms > 0.0 {
            Duration::from_secs_f64(ms / 1000.0)
        } else {
            Duration::ZERO
        };
        Self::new(interval)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Whether a step may run at `now`. Records `now` as the last step when it may.
    ///
    /// The first frame after construction or [`FramePacer::reset`] always passes.
    pub fn try_step(&mut self, now: Duration) -> bool {
        let due = match self.last_step {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.min_interval,
        };
        if due {
            self.last_step = Some(now);
        }
        due
    }

    pub fn reset(&mut self) {
        self.last_step = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
