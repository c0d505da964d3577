//! Sample Types for the Acquisition Path
//!
//! ## Overview
//!
//! A [`Sample`] records the outcome of exactly one acquisition attempt,
//! successful or not. Failed attempts keep their classification so that:
//!
//! - The statistics engine can report a success rate over the whole
//!   history window, not just over the readings that worked
//! - The raw log preserves a complete record of the session, including
//!   the driver message of every fault, for later diagnostics
//!
//! ## Invariant
//!
//! `temperature` and `humidity` are both present if and only if the
//! status is [`SampleStatus::Ok`]. The fields are private and every
//! `Sample` is built through one of the three constructors, so the
//! invariant holds by construction and no consumer needs to re-check it.
//!
//! ## Lifecycle
//!
//! The acquisition policy creates one `Sample` per tick; it is immutable
//! afterwards. The reading buffer owns it until eviction; the raw log
//! receives a formatted copy at creation time.

use core::fmt;

use chrono::{DateTime, Utc};

/// Classification of one acquisition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleStatus {
    /// Both values were read successfully
    Ok,
    /// Sensor was contacted but produced no usable reading this attempt
    NoData,
    /// The acquisition path failed outright; driver message kept verbatim
    Fault(String),
}

impl SampleStatus {
    /// Whether this status carries reading values
    pub fn is_ok(&self) -> bool {
        matches!(self, SampleStatus::Ok)
    }
}

impl fmt::Display for SampleStatus {
    /// Renders the vocabulary used in the raw log's `Estado` column, so
    /// files written by this engine line up with existing session data.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleStatus::Ok => write!(f, "OK"),
            SampleStatus::NoData => write!(f, "ERROR"),
            SampleStatus::Fault(message) => write!(f, "EXCEPCION: {message}"),
        }
    }
}

/// One classified acquisition outcome
///
/// Construct with [`Sample::ok`], [`Sample::no_data`] or
/// [`Sample::fault`]; the value/status pairing invariant is maintained
/// by these constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// When the acquisition attempt completed
    taken_at: DateTime<Utc>,

    /// Temperature in °C, present only on success
    temperature: Option<f32>,

    /// Relative humidity in %, present only on success
    humidity: Option<f32>,

    /// Outcome classification
    status: SampleStatus,
}

impl Sample {
    /// A successful reading carrying both values
    pub fn ok(taken_at: DateTime<Utc>, temperature: f32, humidity: f32) -> Self {
        Self {
            taken_at,
            temperature: Some(temperature),
            humidity: Some(humidity),
            status: SampleStatus::Ok,
        }
    }

    /// Sensor answered but had nothing usable this attempt
    pub fn no_data(taken_at: DateTime<Utc>) -> Self {
        Self {
            taken_at,
            temperature: None,
            humidity: None,
            status: SampleStatus::NoData,
        }
    }

    /// The acquisition path failed; `message` is preserved verbatim
    pub fn fault(taken_at: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            taken_at,
            temperature: None,
            humidity: None,
            status: SampleStatus::Fault(message.into()),
        }
    }

    /// Completion time of the acquisition attempt
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// Temperature in °C, `None` unless the attempt succeeded
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Relative humidity in %, `None` unless the attempt succeeded
    pub fn humidity(&self) -> Option<f32> {
        self.humidity
    }

    /// Outcome classification
    pub fn status(&self) -> &SampleStatus {
        &self.status
    }

    /// Whether this sample carries values
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// Both values at once, for callers that only care about successes
    pub fn values(&self) -> Option<(f32, f32)> {
        match (self.temperature, self.humidity) {
            (Some(t), Some(h)) => Some((t, h)),
            _ => None,
        }
    }
}
