// Inter-arrival timing for the log listener
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Time since the clock was started
    pub elapsed: Duration,
    /// Time since the previous tick, or since the start for the first one
    pub delta: Duration,
}

/// Monotonic clock measuring the gap between consecutive events.
#[derive(Debug, Clone)]
pub struct DeltaClock {
    base: Instant,
    previous: Duration,
}

impl DeltaClock {
    pub fn start() -> Self {
        DeltaClock::starting_at(Instant::now())
    }

    pub fn starting_at(base: Instant) -> Self {
        DeltaClock {
            base,
            previous: Duration::ZERO,
        }
    }

    pub fn base(&self) -> Instant {
        self.base
    }

    pub fn tick(&mut self, now: Instant) -> Tick {
        let elapsed = now.saturating_duration_since(self.base);
        let delta = elapsed.saturating_sub(self.previous);
        self.previous = elapsed;
        Tick { elapsed, delta }
    }
}
