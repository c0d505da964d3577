//! Session Statistics over the Reading Buffer
//!
//! ## Overview
//!
//! [`compute`] derives a [`StatsSnapshot`] from the current buffer
//! contents: total/successful counts, the success rate, and a
//! five-number summary (min, max, mean, median, standard deviation) per
//! metric, computed over the *successful* subset only.
//!
//! ## "Insufficient data" is not an error
//!
//! With zero successful samples there is nothing meaningful to
//! aggregate, so `compute` returns `None` instead of a snapshot full of
//! NaN or zero-filled fields. Callers treat this as the normal
//! early-session state.
//!
//! ## Numeric semantics
//!
//! - f64 arithmetic throughout, no rounding inside the engine; rounding
//!   happens only at presentation (the [`Display`](fmt::Display) report
//!   and the per-tick log lines)
//! - Median uses the average-of-two-middles rule for even counts
//! - Standard deviation is the Bessel-corrected sample form (divide by
//!   n - 1), defined as 0 when a single successful sample exists
//! - `success_rate` is a percentage over the *whole* buffer, failures
//!   included

use core::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::buffer::ReadingBuffer;

/// Minimum successful samples before a spread is defined
const MIN_STDDEV_SAMPLES: usize = 2;

/// Five-number summary for one metric
///
/// Serialized field names match the snapshot file's wire keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    /// Smallest successful reading
    pub min: f64,
    /// Largest successful reading
    pub max: f64,
    /// Arithmetic mean
    #[serde(rename = "promedio")]
    pub mean: f64,
    /// Median, averaging the two middles for even counts
    #[serde(rename = "mediana")]
    pub median: f64,
    /// Bessel-corrected sample standard deviation, 0 when n = 1
    #[serde(rename = "desv_estandar")]
    pub stddev: f64,
}

/// Point-in-time aggregate of the session's history window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Samples in the buffer, failures included
    #[serde(rename = "total_lecturas")]
    pub total_count: usize,

    /// Samples that carried values
    #[serde(rename = "lecturas_exitosas")]
    pub success_count: usize,

    /// `success_count / total_count × 100`, unrounded
    #[serde(rename = "tasa_exito")]
    pub success_rate: f64,

    /// Temperature summary in °C
    #[serde(rename = "temperatura")]
    pub temperature: MetricSummary,

    /// Relative humidity summary in %
    #[serde(rename = "humedad")]
    pub humidity: MetricSummary,

    /// When this snapshot was computed (RFC 3339 on the wire)
    #[serde(rename = "ultima_actualizacion")]
    pub generated_at: DateTime<Utc>,
}

/// Aggregates the buffer's successful subset
///
/// Returns `None` when no successful samples exist, which is expected
/// early in a session and after a run of failures on a short window.
pub fn compute(buffer: &ReadingBuffer, generated_at: DateTime<Utc>) -> Option<StatsSnapshot> {
    let mut temperatures = Vec::new();
    let mut humidities = Vec::new();

    for sample in buffer.iter() {
        if let Some((temperature, humidity)) = sample.values() {
            temperatures.push(f64::from(temperature));
            humidities.push(f64::from(humidity));
        }
    }

    if temperatures.is_empty() {
        return None;
    }

    let total_count = buffer.len();
    let success_count = temperatures.len();

    Some(StatsSnapshot {
        total_count,
        success_count,
        success_rate: success_count as f64 / total_count as f64 * 100.0,
        temperature: summarize(&mut temperatures),
        humidity: summarize(&mut humidities),
        generated_at,
    })
}

/// Summary over a non-empty value set; sorts in place for the median
fn summarize(values: &mut [f64]) -> MetricSummary {
    values.sort_by(|a, b| a.total_cmp(b));

    let n = values.len();
    let min = values[0];
    let max = values[n - 1];
    let mean = values.iter().sum::<f64>() / n as f64;

    let median = if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    };

    let stddev = if n < MIN_STDDEV_SAMPLES {
        0.0
    } else {
        let variance = values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        variance.sqrt()
    };

    MetricSummary {
        min,
        max,
        mean,
        median,
        stddev,
    }
}

impl fmt::Display for StatsSnapshot {
    /// Operator-facing statistics report; the only place counts and
    /// metrics are rounded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "readings: {} total, {} ok ({:.1}%)",
            self.total_count, self.success_count, self.success_rate
        )?;
        writeln!(
            f,
            "temperature: min {:.1} max {:.1} mean {:.1} median {:.1} stddev {:.2} (°C)",
            self.temperature.min,
            self.temperature.max,
            self.temperature.mean,
            self.temperature.median,
            self.temperature.stddev
        )?;
        write!(
            f,
            "humidity: min {:.1} max {:.1} mean {:.1} median {:.1} stddev {:.2} (%)",
            self.humidity.min,
            self.humidity.max,
            self.humidity.mean,
            self.humidity.median,
            self.humidity.stddev
        )
    }
}
