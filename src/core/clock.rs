//! Time source for game timestamps.
//!
//! The engine reads the time only through `Clock`, so tests can pin it with
//! `ManualClock` and production uses `SystemClock`.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Source of "now" for the engine.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock with millisecond resolution.
///
/// Clones share the same underlying time, so a test can hand one clone to an
/// `Engine` and keep another to move time forward.
///
/// ```
/// use apple_orange::core::{Clock, ManualClock};
/// use chrono::Duration;
///
/// let clock = ManualClock::at_millis(1_000);
/// let handle = clock.clone();
/// handle.advance(Duration::seconds(5));
/// assert_eq!(clock.now().timestamp_millis(), 6_000);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    /// Start the clock at the given Unix timestamp in milliseconds.
    #[must_use]
    pub fn at_millis(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    /// Move the clock by `by` (negative durations move it back).
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }

    /// Jump to an absolute Unix timestamp in milliseconds.
    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.load(Ordering::SeqCst))
            .single()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::at_millis(0);
        let handle = clock.clone();

        handle.advance(Duration::milliseconds(250));
        assert_eq!(clock.now().timestamp_millis(), 250);

        handle.set_millis(10);
        assert_eq!(clock.now().timestamp_millis(), 10);
    }

    #[test]
    fn test_manual_clock_can_go_backwards() {
        let clock = ManualClock::at_millis(5_000);
        clock.advance(Duration::seconds(-2));
        assert_eq!(clock.now().timestamp_millis(), 3_000);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }
}
