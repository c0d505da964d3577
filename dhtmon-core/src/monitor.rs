//! Monitoring Session Loop
//!
//! ## Overview
//!
//! [`Monitor`] is the single driver of a session: it owns the sensor
//! port, the reading buffer and both output files, and advances through
//! `Idle → Running → Stopping → Stopped`. Each tick:
//!
//! 1. Check cancellation, then the session deadline
//! 2. Acquire one classified sample and report it on the operator channel
//! 3. Append the sample to the raw log (best-effort)
//! 4. Push it into the reading buffer
//! 5. Every Nth sample, compute statistics and persist the snapshot
//! 6. Sleep the remainder of the interval, measured from tick start
//!
//! ## Failure containment
//!
//! Nothing that happens inside a tick ends the session. Failed
//! acquisitions become failed samples; failed writes are logged with
//! `warn!` and dropped. Only cancellation or the deadline stop the loop,
//! and both run the same final statistics flush before `Stopped`.
//!
//! ## Timing
//!
//! The interval is measured tick start to tick start: the sleep is
//! `interval - elapsed` clamped at zero. There is no compensation for
//! drift accumulated across ticks. Cancellation is cooperative and only
//! observed at tick boundaries; it does not interrupt an in-flight
//! `poll` or the interval sleep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use core::fmt;

use log::{info, warn};

use crate::acquisition::Acquirer;
use crate::buffer::ReadingBuffer;
use crate::config::MonitorConfig;
use crate::errors::StorageError;
use crate::sample::Sample;
use crate::sensor::SensorPort;
use crate::stats::{self, StatsSnapshot};
use crate::storage::{RawLog, SnapshotFile};
use crate::time::Clock;

/// Lifecycle of a monitoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Constructed, not yet running
    Idle,
    /// Ticking
    Running,
    /// Leaving the loop; final flush in progress
    Stopping,
    /// Session over, resources released
    Stopped,
}

/// Why a session left the `Running` state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    /// The configured duration elapsed
    Deadline,
    /// The cancel token was tripped
    Cancelled,
}

impl fmt::Display for StopCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCause::Deadline => write!(f, "deadline reached"),
            StopCause::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Cooperative cancellation flag for a running session
///
/// Clones share the flag; hand one clone to the monitor's caller (or a
/// Ctrl-C handler) and keep another to trip it. Checked once per tick
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that has not been tripped
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the session to stop at the next tick boundary
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// What a finished session looked like
#[derive(Debug)]
pub struct SessionReport {
    /// Acquisition attempts performed
    pub ticks: usize,
    /// What ended the session
    pub stop_cause: StopCause,
    /// Result of the final statistics flush; `None` when the session
    /// produced no successful sample
    pub final_snapshot: Option<StatsSnapshot>,
}

/// Drives one monitoring session over a sensor port
pub struct Monitor<P: SensorPort, C: Clock> {
    config: MonitorConfig,
    acquirer: Acquirer<P>,
    clock: C,
    buffer: ReadingBuffer,
    raw_log: RawLog,
    snapshot_file: SnapshotFile,
    state: MonitorState,
}

impl<P: SensorPort, C: Clock> Monitor<P, C> {
    /// Prepares a session: allocates the history buffer and initializes
    /// the raw log with its header row. The session starts on
    /// [`run`](Self::run).
    pub fn new(port: P, clock: C, config: MonitorConfig) -> Result<Self, StorageError> {
        let raw_log = RawLog::create(&config.raw_log_path)?;
        let snapshot_file = SnapshotFile::new(&config.snapshot_path);
        let buffer = ReadingBuffer::new(config.capacity);

        Ok(Self {
            acquirer: Acquirer::new(port),
            clock,
            buffer,
            raw_log,
            snapshot_file,
            config,
            state: MonitorState::Idle,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Read-only view of the history window
    pub fn buffer(&self) -> &ReadingBuffer {
        &self.buffer
    }

    /// Runs the session to completion, blocking the calling thread
    ///
    /// Returns when the configured duration elapses or `cancel` is
    /// tripped; either way one final statistics computation and flush
    /// happens before returning, regardless of the cadence gate.
    /// Consuming `self` releases the sensor port and both files when
    /// this returns.
    pub fn run(mut self, cancel: &CancelToken) -> SessionReport {
        self.state = MonitorState::Running;

        // Deadline in wall-clock terms; a duration too large for the
        // calendar degrades to unbounded.
        let deadline = self.config.duration.and_then(|duration| {
            let delta = chrono::Duration::from_std(duration).ok()?;
            self.clock.now().checked_add_signed(delta)
        });

        info!(
            "session started: interval {:?}, duration {}, capacity {}",
            self.config.interval,
            match self.config.duration {
                Some(d) => format!("{d:?}"),
                None => "unbounded".to_string(),
            },
            self.config.capacity
        );

        let mut ticks = 0usize;
        let stop_cause = loop {
            if cancel.is_cancelled() {
                break StopCause::Cancelled;
            }
            if let Some(deadline) = deadline {
                if self.clock.now() >= deadline {
                    break StopCause::Deadline;
                }
            }

            let tick_started = Instant::now();

            let sample = self.acquirer.acquire(&self.clock);
            self.report_tick(&sample);

            if let Err(err) = self.raw_log.append(&sample) {
                warn!("raw log append failed: {err}");
            }
            self.buffer.push(sample);
            ticks += 1;

            if self.config.stats_every > 0 && self.buffer.len() % self.config.stats_every == 0 {
                self.persist_statistics();
            }

            let remaining = self.config.interval.saturating_sub(tick_started.elapsed());
            if !remaining.is_zero() {
                thread::sleep(remaining);
            }
        };

        self.state = MonitorState::Stopping;
        info!("session stopping: {stop_cause}");

        // Final flush runs on every exit path, cadence gate or not.
        let final_snapshot = self.persist_statistics();

        self.state = MonitorState::Stopped;
        info!("session stopped after {ticks} ticks");

        SessionReport {
            ticks,
            stop_cause,
            final_snapshot,
        }
    }

    /// Operator-facing per-tick line
    fn report_tick(&self, sample: &Sample) {
        match sample.values() {
            Some((temperature, humidity)) => {
                info!("{temperature:.1} °C  {humidity:.1} %");
            }
            None => warn!("acquisition failed: {}", sample.status()),
        }
    }

    /// Computes statistics over the current window and overwrites the
    /// snapshot file when there is something to report
    ///
    /// Returns the snapshot even if the write failed: the in-memory
    /// statistics stay valid either way.
    fn persist_statistics(&self) -> Option<StatsSnapshot> {
        let snapshot = stats::compute(&self.buffer, self.clock.now())?;
        info!("{snapshot}");

        if let Err(err) = self.snapshot_file.write(&snapshot) {
            warn!("snapshot write failed: {err}");
        }
        Some(snapshot)
    }
}
