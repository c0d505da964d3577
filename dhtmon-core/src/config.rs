//! Session Configuration
//!
//! Everything tunable about a monitoring session lives in
//! [`MonitorConfig`] and is handed to the monitor's constructor
//! explicitly; no module-level globals. Defaults mirror a typical
//! single-sensor deployment.

use std::path::PathBuf;
use std::time::Duration;

/// Default seconds between acquisition attempts
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Default total session length (one hour)
pub const DEFAULT_DURATION: Duration = Duration::from_secs(60 * 60);

/// Default reading buffer capacity
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default statistics cadence: persist every Nth sample
pub const DEFAULT_STATS_EVERY: usize = 10;

/// Default raw log location
pub const DEFAULT_RAW_LOG_PATH: &str = "datos_dht11.csv";

/// Default snapshot location
pub const DEFAULT_SNAPSHOT_PATH: &str = "estadisticas_dht11.json";

/// Parameters of one monitoring session
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Time between acquisition attempts, measured tick start to tick
    /// start
    pub interval: Duration,

    /// Total session length; `None` runs until cancelled
    pub duration: Option<Duration>,

    /// How many samples the in-memory history retains
    pub capacity: usize,

    /// Persist statistics every Nth sample; 0 disables the cadence
    /// (the final flush still runs)
    pub stats_every: usize,

    /// Append-only CSV destination
    pub raw_log_path: PathBuf,

    /// Latest-statistics JSON destination
    pub snapshot_path: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            duration: Some(DEFAULT_DURATION),
            capacity: DEFAULT_CAPACITY,
            stats_every: DEFAULT_STATS_EVERY,
            raw_log_path: PathBuf::from(DEFAULT_RAW_LOG_PATH),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

impl MonitorConfig {
    /// Set the tick interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Bound the session to a total length
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Run until cancelled
    pub fn unbounded(mut self) -> Self {
        self.duration = None;
        self
    }

    /// Set the history window size
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the statistics cadence
    pub fn with_stats_every(mut self, every: usize) -> Self {
        self.stats_every = every;
        self
    }

    /// Set both output file locations
    pub fn with_paths(
        mut self,
        raw_log_path: impl Into<PathBuf>,
        snapshot_path: impl Into<PathBuf>,
    ) -> Self {
        self.raw_log_path = raw_log_path.into();
        self.snapshot_path = snapshot_path.into();
        self
    }
}
