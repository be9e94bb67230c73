//! # Clock
//!
//! Engines never own timers. The hosting shell ticks them with timestamps
//! drawn from a [`Clock`], so unit tests crank a [`ManualClock`] by hand
//! instead of sleeping. Timestamps are durations since the clock's own
//! arbitrary epoch; only differences are meaningful.

use std::time::Duration;

pub trait Clock {
    /// Time elapsed since this clock's epoch.
    fn now(&self) -> Duration;
}

/// Wall time, for real shells.
pub struct WallClock {
    origin: std::time::Instant,
}
impl WallClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}
impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}
impl Clock for WallClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-cranked time, for tests and scripted hosts.
#[derive(Default)]
pub struct ManualClock {
    now: std::cell::Cell<Duration>,
}
impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod test {
    use super::{Clock, ManualClock};
    use std::time::Duration;

    #[test]
    fn manual_clock_only_moves_when_cranked() {
        let clock = ManualClock::default();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(Duration::from_secs(3));
        clock.advance(Duration::from_millis(500));
        assert_eq!(clock.now(), Duration::from_millis(3500));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }
}
