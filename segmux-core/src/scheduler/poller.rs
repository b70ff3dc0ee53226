//! Fixed-interval poll schedule
//!
//! Ticks that were missed because a cycle overran (or the executor was
//! busy elsewhere) are skipped, not queued: the schedule re-anchors to the
//! next interval boundary and the number of dropped ticks is reported.

/// Result of checking the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Too early, keep waiting
    NotDue,
    /// Run one cycle now; `skipped` ticks were dropped since the last one
    Due { skipped: u32 },
}

/// Fixed-interval poll schedule
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Poller {
    /// Interval between ticks (ms), never zero
    interval_ms: u64,
    /// Time of the next tick (ms)
    next_due_ms: u64,
    /// Ticks dropped since creation
    skipped_total: u32,
}

impl Poller {
    /// Create a schedule whose first tick is due at `start_ms`
    ///
    /// An interval of zero is treated as 1 ms.
    pub fn new(interval_ms: u32, start_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as u64,
            next_due_ms: start_ms,
            skipped_total: 0,
        }
    }

    /// Interval between ticks (ms)
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Time the next tick is due (ms)
    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }

    /// Total ticks dropped because they were late
    pub fn skipped_total(&self) -> u32 {
        self.skipped_total
    }

    /// Check the schedule at time `now_ms`
    ///
    /// Returns [`Tick::Due`] at most once per interval boundary.
    pub fn on_tick(&mut self, now_ms: u64) -> Tick {
        if now_ms < self.next_due_ms {
            return Tick::NotDue;
        }

        let late = now_ms - self.next_due_ms;
        let skipped = late / self.interval_ms;
        self.next_due_ms += (skipped + 1) * self.interval_ms;

        let skipped = u32::try_from(skipped).unwrap_or(u32::MAX);
        self.skipped_total = self.skipped_total.saturating_add(skipped);
        Tick::Due { skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_at_start() {
        let mut poller = Poller::new(25, 1000);
        assert_eq!(poller.on_tick(999), Tick::NotDue);
        assert_eq!(poller.on_tick(1000), Tick::Due { skipped: 0 });
        assert_eq!(poller.next_due_ms(), 1025);
    }

    #[test]
    fn test_once_per_interval() {
        let mut poller = Poller::new(25, 0);
        assert_eq!(poller.on_tick(0), Tick::Due { skipped: 0 });
        assert_eq!(poller.on_tick(10), Tick::NotDue);
        assert_eq!(poller.on_tick(24), Tick::NotDue);
        assert_eq!(poller.on_tick(25), Tick::Due { skipped: 0 });
    }

    #[test]
    fn test_slightly_late_keeps_phase() {
        let mut poller = Poller::new(25, 0);
        poller.on_tick(0);
        assert_eq!(poller.on_tick(30), Tick::Due { skipped: 0 });
        assert_eq!(poller.next_due_ms(), 50);
    }

    #[test]
    fn test_overrun_skips_missed_ticks() {
        let mut poller = Poller::new(25, 0);
        poller.on_tick(0);

        // Woke at 110: ticks at 25, 50, 75 were missed, 100 runs now
        assert_eq!(poller.on_tick(110), Tick::Due { skipped: 3 });
        assert_eq!(poller.next_due_ms(), 125);
        assert_eq!(poller.skipped_total(), 3);
    }

    #[test]
    fn test_zero_interval_clamped() {
        let mut poller = Poller::new(0, 0);
        assert_eq!(poller.interval_ms(), 1);
        assert_eq!(poller.on_tick(0), Tick::Due { skipped: 0 });
        assert_eq!(poller.on_tick(0), Tick::NotDue);
    }
}
