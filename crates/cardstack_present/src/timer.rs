//! Repeating auto-dismiss timer
//!
//! Polled from the manager's update loop. The timer keeps firing every
//! interval until its owner drops it, so a tick skipped while the user is
//! dragging is retried one interval later.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DismissTimer {
    interval_ms: u64,
    next_fire_ms: u64,
}

impl DismissTimer {
    /// Arm a timer whose first tick is `interval` after `now_ms`
    pub fn new(interval: Duration, now_ms: u64) -> Self {
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        Self {
            interval_ms,
            next_fire_ms: now_ms.saturating_add(interval_ms),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Time of the next tick
    pub fn next_fire_ms(&self) -> u64 {
        self.next_fire_ms
    }

    /// Whether a tick elapsed since the last poll. Ticks missed between polls
    /// collapse into one.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_fire_ms {
            return false;
        }
        let step = self.interval_ms.max(1);
        let missed = (now_ms - self.next_fire_ms) / step + 1;
        self.next_fire_ms = self
            .next_fire_ms
            .saturating_add(missed.saturating_mul(step));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_every_interval() {
        let mut timer = DismissTimer::new(Duration::from_secs(3), 1_000);
        assert!(!timer.poll(3_999));
        assert!(timer.poll(4_000));
        assert!(!timer.poll(4_001));
        assert!(timer.poll(7_000));
    }

    #[test]
    fn test_missed_ticks_collapse() {
        let mut timer = DismissTimer::new(Duration::from_secs(1), 0);
        assert!(timer.poll(5_500));
        assert_eq!(timer.next_fire_ms(), 6_000);
        assert!(!timer.poll(5_900));
    }

    #[test]
    fn test_zero_interval() {
        let mut timer = DismissTimer::new(Duration::ZERO, 100);
        assert!(timer.poll(100));
        assert!(timer.poll(101));
    }
}
