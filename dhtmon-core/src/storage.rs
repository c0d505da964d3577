//! Durable Session Output
//!
//! ## Overview
//!
//! Two independent write paths, both best-effort from the monitor's
//! point of view (a failed write is logged and the loop continues):
//!
//! - [`RawLog`]: append-only CSV, one row per sample. The header is
//!   written once when the session starts; after that the file is only
//!   ever appended to.
//! - [`SnapshotFile`]: whole-file overwrite of the latest statistics as
//!   pretty-printed JSON. Represents "current state", not history.
//!
//! ## Durability model
//!
//! Each write opens and closes the file rather than holding a handle
//! across ticks, so every appended row and every snapshot overwrite is
//! flushed to the OS before the next tick starts. There is no
//! write-ahead guarantee beyond that; a crash can at worst lose the row
//! being written.
//!
//! ## Raw log format
//!
//! ```csv
//! Timestamp,Temperatura_C,Humedad_%,Estado
//! 2024-03-01 10:15:00,22.5,55,OK
//! 2024-03-01 10:15:05,,,ERROR
//! ```
//!
//! Numeric fields are written blank (not omitted) on failed samples so
//! the four columns always stay aligned.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::StorageError;
use crate::sample::Sample;
use crate::stats::StatsSnapshot;

/// Header row written once per session
pub const RAW_LOG_HEADER: &str = "Timestamp,Temperatura_C,Humedad_%,Estado";

/// Timestamp layout of raw log rows
const ROW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only CSV record of every sample in the session
#[derive(Debug, Clone)]
pub struct RawLog {
    path: PathBuf,
}

impl RawLog {
    /// Starts a fresh log for this session: truncates any previous file
    /// and writes the header row. The file is never truncated again
    /// until the next session.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let mut file = File::create(&path).map_err(|source| StorageError::io(&path, source))?;
        writeln!(file, "{RAW_LOG_HEADER}").map_err(|source| StorageError::io(&path, source))?;
        Ok(Self { path })
    }

    /// Appends one row, opening and closing the file so the row is
    /// durable even if the process dies before the next tick
    pub fn append(&self, sample: &Sample) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| StorageError::io(&self.path, source))?;
        writeln!(file, "{}", format_row(sample))
            .map_err(|source| StorageError::io(&self.path, source))?;
        Ok(())
    }

    /// Where this session's rows are going
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One CSV row: timestamp, values (blank on failure), status
fn format_row(sample: &Sample) -> String {
    let temperature = sample
        .temperature()
        .map(|value| value.to_string())
        .unwrap_or_default();
    let humidity = sample
        .humidity()
        .map(|value| value.to_string())
        .unwrap_or_default();

    // Commas inside a fault message would break column alignment.
    let status = sample.status().to_string().replace(',', ";");

    format!(
        "{},{},{},{}",
        sample.taken_at().format(ROW_TIME_FORMAT),
        temperature,
        humidity,
        status
    )
}

/// Latest-statistics file, overwritten in full on every write
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Snapshot destination; nothing is written until [`write`](Self::write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Overwrites the file with the snapshot, pretty-printed for human
    /// inspection. Writing the same snapshot twice produces identical
    /// bytes.
    pub fn write(&self, snapshot: &StatsSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let mut file =
            File::create(&self.path).map_err(|source| StorageError::io(&self.path, source))?;
        file.write_all(json.as_bytes())
            .map_err(|source| StorageError::io(&self.path, source))?;
        file.write_all(b"\n")
            .map_err(|source| StorageError::io(&self.path, source))?;
        Ok(())
    }

    /// Where the latest snapshot lands
    pub fn path(&self) -> &Path {
        &self.path
    }
}
