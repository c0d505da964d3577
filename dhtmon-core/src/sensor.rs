//! Sensor Port Boundary
//!
//! The monitor drives exactly one physical sensor through the
//! [`SensorPort`] trait. Implementations are hardware drivers (DHT11,
//! DHT22, anything that yields a temperature/humidity pair) or test
//! doubles such as [`ScriptedSensor`].
//!
//! ## Contract
//!
//! `poll` may block for the duration of one physical measurement and
//! must be callable repeatedly; a failed call must not leave shared
//! hardware state corrupted. Low-level retrying is the driver's concern:
//! the DHT wire protocol routinely needs a few attempts per reading, so
//! by the time `poll` returns, the outcome is final for this tick and
//! the layers above perform no further retries.

use std::collections::VecDeque;

use crate::errors::AcquisitionFailure;

/// One measurement: `(temperature °C, relative humidity %)`
pub type Reading = (f32, f32);

/// Capability to take one temperature/humidity measurement
pub trait SensorPort {
    /// Take one measurement, blocking until the sensor answers or the
    /// driver gives up
    fn poll(&mut self) -> Result<Reading, AcquisitionFailure>;
}

/// Deterministic sensor double replaying a scripted sequence of outcomes
///
/// Each `poll` consumes the next scripted outcome; once the script is
/// exhausted every further poll returns
/// [`AcquisitionFailure::NoReading`]. Useful for tests and examples that
/// need reproducible sessions:
///
/// ```rust
/// use dhtmon_core::sensor::{ScriptedSensor, SensorPort};
/// use dhtmon_core::errors::AcquisitionFailure;
///
/// let mut sensor = ScriptedSensor::new([
///     Ok((21.0, 48.0)),
///     Err(AcquisitionFailure::NoReading),
/// ]);
///
/// assert_eq!(sensor.poll(), Ok((21.0, 48.0)));
/// assert_eq!(sensor.poll(), Err(AcquisitionFailure::NoReading));
/// // Script exhausted: keeps reporting no reading
/// assert_eq!(sensor.poll(), Err(AcquisitionFailure::NoReading));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    script: VecDeque<Result<Reading, AcquisitionFailure>>,
}

impl ScriptedSensor {
    /// Sensor that will play back `script` in order
    pub fn new(script: impl IntoIterator<Item = Result<Reading, AcquisitionFailure>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Sensor that answers every poll successfully with the given pairs
    pub fn readings(pairs: impl IntoIterator<Item = Reading>) -> Self {
        Self::new(pairs.into_iter().map(Ok))
    }

    /// Outcomes left in the script
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SensorPort for ScriptedSensor {
    fn poll(&mut self) -> Result<Reading, AcquisitionFailure> {
        self.script
            .pop_front()
            .unwrap_or(Err(AcquisitionFailure::NoReading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_plays_in_order() {
        let mut sensor = ScriptedSensor::new([
            Ok((20.0, 50.0)),
            Err(AcquisitionFailure::Fault("bus timeout".into())),
            Ok((22.0, 55.0)),
        ]);

        assert_eq!(sensor.remaining(), 3);
        assert_eq!(sensor.poll(), Ok((20.0, 50.0)));
        assert_eq!(
            sensor.poll(),
            Err(AcquisitionFailure::Fault("bus timeout".into()))
        );
        assert_eq!(sensor.poll(), Ok((22.0, 55.0)));
        assert_eq!(sensor.remaining(), 0);
    }

    #[test]
    fn exhausted_script_reports_no_reading() {
        let mut sensor = ScriptedSensor::readings([(19.5, 45.0)]);
        let _ = sensor.poll();

        assert_eq!(sensor.poll(), Err(AcquisitionFailure::NoReading));
        assert_eq!(sensor.poll(), Err(AcquisitionFailure::NoReading));
    }
}
