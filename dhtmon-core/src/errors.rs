//! Error Types for Acquisition and Persistence
//!
//! ## Design
//!
//! The engine distinguishes two failure surfaces, and neither of them
//! terminates the monitor loop:
//!
//! - [`AcquisitionFailure`]: the sensor port could not produce a reading.
//!   Recorded as a failed [`Sample`](crate::sample::Sample) and counted
//!   against the session success rate.
//! - [`StorageError`]: a file write failed (permissions, disk full,
//!   missing path). Reported on the log and dropped; the in-memory
//!   buffer and statistics stay valid.
//!
//! "Insufficient data" is deliberately *not* here: the statistics engine
//! returns `Option::None` for an empty successful subset, because an
//! empty window is a normal early-session state, not a failure.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why the sensor port failed to produce a reading
///
/// `NoReading` is the expected, recoverable case: the DHT protocol
/// regularly drops a handshake or fails its checksum even on healthy
/// hardware. `Fault` covers everything unexpected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionFailure {
    /// Sensor was contacted but returned no usable value pair
    #[error("sensor returned no reading")]
    NoReading,

    /// Unexpected driver failure (bus fault, timeout, protocol error);
    /// the message is carried into the failed sample verbatim
    #[error("sensor fault: {0}")]
    Fault(String),
}

/// A raw-log or snapshot write failed
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying file operation failed
    #[error("{path}: {source}")]
    Io {
        /// File the operation targeted
        path: PathBuf,
        /// Operating system error
        source: io::Error,
    },

    /// The statistics snapshot could not be encoded as JSON
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisition_failure_display() {
        assert_eq!(
            AcquisitionFailure::NoReading.to_string(),
            "sensor returned no reading"
        );
        assert_eq!(
            AcquisitionFailure::Fault("bus timeout".into()).to_string(),
            "sensor fault: bus timeout"
        );
    }

    #[test]
    fn storage_error_carries_path() {
        let err = StorageError::io(
            Path::new("datos/out.csv"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("out.csv"));
        assert!(rendered.contains("denied"));
    }
}
