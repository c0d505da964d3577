//! Clock abstraction for timestamping samples
//!
//! The engine stamps every sample and statistics snapshot through a
//! [`Clock`], so a session can run against:
//! - The system wall clock (normal operation)
//! - A fixed, manually advanced clock (deterministic tests)
//!
//! Timestamps are UTC; the persistence layer decides how they are
//! rendered on disk.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// Source of wall-clock time for the monitor
pub trait Clock {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// System clock, the normal time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for testing
///
/// Clones share the same underlying instant, so a test can keep a handle
/// while the monitor owns its copy:
///
/// ```rust
/// use dhtmon_core::time::{Clock, FixedClock};
/// use chrono::Duration;
///
/// let clock = FixedClock::at_epoch_seconds(1_700_000_000);
/// let handle = clock.clone();
///
/// handle.advance(Duration::seconds(5));
/// assert_eq!(clock.now(), handle.now());
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    // Epoch milliseconds; atomic so clones can advance a shared instant
    // without locking.
    millis: Arc<AtomicI64>,
}

impl FixedClock {
    /// Clock pinned at the given instant
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start.timestamp_millis())),
        }
    }

    /// Clock pinned at the given Unix timestamp, in seconds
    pub fn at_epoch_seconds(seconds: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(seconds * 1000)),
        }
    }

    /// Move the clock to an absolute instant
    pub fn set(&self, to: DateTime<Utc>) {
        self.millis.store(to.timestamp_millis(), Ordering::SeqCst);
    }

    /// Advance the clock by a delta
    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}
