//! Core monitoring engine for DhtMon
//!
//! Collects temperature/humidity telemetry from a single sensor on a
//! fixed cadence, keeps a bounded in-memory history window, derives
//! summary statistics over the successful readings and persists both an
//! append-only raw CSV log and a latest-statistics JSON snapshot.
//!
//! Key properties:
//! - Bounded memory: the history window is a fixed-capacity ring buffer
//! - Failure tolerant: failed acquisitions become classified samples,
//!   never loop failures
//! - Best-effort persistence: a failed write is logged and the session
//!   continues
//!
//! ```no_run
//! use std::time::Duration;
//! use dhtmon_core::{CancelToken, Monitor, MonitorConfig, ScriptedSensor, SystemClock};
//!
//! let config = MonitorConfig::default()
//!     .with_interval(Duration::from_secs(5))
//!     .with_duration(Duration::from_secs(60));
//!
//! let sensor = ScriptedSensor::readings([(21.5, 48.0), (21.6, 48.5)]);
//! let monitor = Monitor::new(sensor, SystemClock, config).expect("session files");
//!
//! let report = monitor.run(&CancelToken::new());
//! println!("session finished after {} ticks", report.ticks);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod acquisition;
pub mod buffer;
pub mod config;
pub mod errors;
pub mod monitor;
pub mod sample;
pub mod sensor;
pub mod stats;
pub mod storage;
pub mod time;

// Public API
pub use acquisition::Acquirer;
pub use buffer::ReadingBuffer;
pub use config::MonitorConfig;
pub use errors::{AcquisitionFailure, StorageError};
pub use monitor::{CancelToken, Monitor, MonitorState, SessionReport, StopCause};
pub use sample::{Sample, SampleStatus};
pub use sensor::{Reading, ScriptedSensor, SensorPort};
pub use stats::{MetricSummary, StatsSnapshot};
pub use storage::{RawLog, SnapshotFile};
pub use time::{Clock, FixedClock, SystemClock};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
