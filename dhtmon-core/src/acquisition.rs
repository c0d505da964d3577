//! Outcome Classification for Acquisition Attempts
//!
//! [`Acquirer`] sits between the monitor loop and the sensor port: one
//! `poll` per tick, and every outcome (success, empty reading, driver
//! fault) becomes exactly one [`Sample`]. Keeping the classification in
//! one place means the rest of the engine never inspects driver errors;
//! it only sees the tri-state [`SampleStatus`](crate::sample::SampleStatus).
//!
//! No retries happen at this layer. A failed attempt yields one failed
//! sample for the tick, which keeps the tick cadence deterministic
//! against the configured interval.

use crate::errors::AcquisitionFailure;
use crate::sample::Sample;
use crate::sensor::SensorPort;
use crate::time::Clock;

/// Classifies sensor poll outcomes into samples
#[derive(Debug)]
pub struct Acquirer<P: SensorPort> {
    port: P,
}

impl<P: SensorPort> Acquirer<P> {
    /// Takes exclusive ownership of the port for the session
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Polls once and classifies the outcome
    ///
    /// The sample is stamped after `poll` returns, i.e. with the time
    /// the attempt *completed*; a blocking measurement does not get the
    /// tick's start time.
    pub fn acquire(&mut self, clock: &dyn Clock) -> Sample {
        match self.port.poll() {
            Ok((temperature, humidity)) => Sample::ok(clock.now(), temperature, humidity),
            Err(AcquisitionFailure::NoReading) => Sample::no_data(clock.now()),
            Err(AcquisitionFailure::Fault(message)) => Sample::fault(clock.now(), message),
        }
    }

    /// Releases the sensor port back to the caller
    pub fn into_port(self) -> P {
        self.port
    }
}
