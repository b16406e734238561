//! Time source for note timestamps.
//!
//! Production code reads the system clock; tests drive a `ManualClock` so
//! timestamp assertions are deterministic.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Explicitly driven clock.
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to the store.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current_ms: Rc<Cell<i64>>,
}

impl ManualClock {
    /// Creates a clock starting at `start_ms`.
    pub fn at_ms(start_ms: i64) -> Self {
        Self {
            current_ms: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Moves time forward by `ms` and returns the new instant.
    pub fn advance_ms(&self, ms: i64) -> i64 {
        let next = self.current_ms.get().saturating_add(ms);
        self.current_ms.set(next);
        next
    }

    /// Sets an absolute instant. Going backwards is allowed so tests can
    /// simulate wall-clock steps.
    pub fn set_ms(&self, ms: i64) {
        self.current_ms.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.current_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::at_ms(1_000);
        let handle = clock.clone();
        handle.advance_ms(250);
        assert_eq!(clock.now_ms(), 1_250);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now_ms() > 0);
    }
}
