//! End-to-End Session Tests for DhtMon
//!
//! These tests run complete monitoring sessions against scripted sensors
//! and verify the on-disk results (raw CSV rows and the JSON snapshot)
//! the way an operator would inspect them after a run.
//!
//! ## Test Philosophy
//!
//! Each test is one realistic session shape:
//! - A healthy sensor with occasional protocol hiccups
//! - A sensor that faults mid-session
//! - An immediately expiring session (duration zero)
//!
//! Sessions tick with a zero interval and a clock advanced one second
//! per poll, so they finish instantly and deterministically.

use std::time::Duration;

use dhtmon_core::{
    AcquisitionFailure, CancelToken, FixedClock, Monitor, MonitorConfig, ScriptedSensor,
    SensorPort, StopCause,
};

/// Seconds the clock moves per acquisition; one tick = one second.
const TICK_SECONDS: i64 = 1;

/// Session start instant; arbitrary but fixed for reproducible rows.
const SESSION_EPOCH: i64 = 1_700_000_000;

/// Sensor wrapper that advances the shared session clock on every poll,
/// standing in for the real passage of time between measurements.
struct TickingSensor {
    inner: ScriptedSensor,
    clock: FixedClock,
}

impl TickingSensor {
    fn new(inner: ScriptedSensor, clock: FixedClock) -> Self {
        Self { inner, clock }
    }
}

impl SensorPort for TickingSensor {
    fn poll(&mut self) -> Result<(f32, f32), AcquisitionFailure> {
        self.clock.advance(chrono::Duration::seconds(TICK_SECONDS));
        self.inner.poll()
    }
}

fn session_config(dir: &tempfile::TempDir, seconds: u64) -> MonitorConfig {
    MonitorConfig::default()
        .with_interval(Duration::ZERO)
        .with_duration(Duration::from_secs(seconds))
        .with_paths(dir.path().join("datos.csv"), dir.path().join("stats.json"))
}

#[test]
fn healthy_session_persists_rows_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::at_epoch_seconds(SESSION_EPOCH);

    let script = ScriptedSensor::new([
        Ok((20.0, 50.0)),
        Err(AcquisitionFailure::NoReading),
        Ok((22.0, 55.0)),
        Ok((24.0, 60.0)),
    ]);
    let sensor = TickingSensor::new(script, clock.clone());

    let report = Monitor::new(sensor, clock, session_config(&dir, 4))
        .unwrap()
        .run(&CancelToken::new());

    assert_eq!(report.ticks, 4);
    assert_eq!(report.stop_cause, StopCause::Deadline);

    // Raw log: header plus one row per tick, in acquisition order.
    let csv = std::fs::read_to_string(dir.path().join("datos.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Timestamp,Temperatura_C,Humedad_%,Estado");
    assert!(lines[1].ends_with(",20,50,OK"));
    assert!(lines[2].ends_with(",,,ERROR"));
    assert!(lines[3].ends_with(",22,55,OK"));
    assert!(lines[4].ends_with(",24,60,OK"));

    // Snapshot: final flush over the whole window.
    let snapshot: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("stats.json")).unwrap())
            .unwrap();
    assert_eq!(snapshot["total_lecturas"], 4);
    assert_eq!(snapshot["lecturas_exitosas"], 3);
    assert_eq!(snapshot["temperatura"]["min"], 20.0);
    assert_eq!(snapshot["temperatura"]["max"], 24.0);
    assert_eq!(snapshot["temperatura"]["promedio"], 22.0);
    assert_eq!(snapshot["humedad"]["mediana"], 55.0);

    let report_snapshot = report.final_snapshot.unwrap();
    assert_eq!(report_snapshot.success_count, 3);
    assert!((report_snapshot.success_rate - 75.0).abs() < 1e-9);
}

#[test]
fn faulting_sensor_is_recorded_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::at_epoch_seconds(SESSION_EPOCH);

    let script = ScriptedSensor::new([
        Ok((21.0, 52.0)),
        Err(AcquisitionFailure::Fault("DHT11 checksum mismatch".into())),
        Ok((21.5, 53.0)),
    ]);
    let sensor = TickingSensor::new(script, clock.clone());

    let report = Monitor::new(sensor, clock, session_config(&dir, 3))
        .unwrap()
        .run(&CancelToken::new());

    assert_eq!(report.ticks, 3);

    let csv = std::fs::read_to_string(dir.path().join("datos.csv")).unwrap();
    let fault_row = csv.lines().nth(2).unwrap();
    assert!(fault_row.ends_with(",,,EXCEPCION: DHT11 checksum mismatch"));

    // The fault is counted against the success rate but excluded from
    // the aggregates.
    let snapshot = report.final_snapshot.unwrap();
    assert_eq!(snapshot.total_count, 3);
    assert_eq!(snapshot.success_count, 2);
    assert!((snapshot.temperature.max - 21.5).abs() < 1e-9);
}

#[test]
fn statistics_cadence_overwrites_snapshot_during_session() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::at_epoch_seconds(SESSION_EPOCH);

    // Cadence of 2 with 5 ticks: snapshot written at ticks 2 and 4,
    // then once more by the final flush with all 5 samples.
    let script = ScriptedSensor::readings([
        (20.0, 50.0),
        (21.0, 51.0),
        (22.0, 52.0),
        (23.0, 53.0),
        (24.0, 54.0),
    ]);
    let sensor = TickingSensor::new(script, clock.clone());
    let config = session_config(&dir, 5).with_stats_every(2);

    let report = Monitor::new(sensor, clock, config)
        .unwrap()
        .run(&CancelToken::new());

    assert_eq!(report.ticks, 5);
    let snapshot: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("stats.json")).unwrap())
            .unwrap();
    // Only the latest state survives the overwrites.
    assert_eq!(snapshot["total_lecturas"], 5);
    assert_eq!(snapshot["temperatura"]["max"], 24.0);
}

#[test]
fn zero_duration_session_still_flushes() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::at_epoch_seconds(SESSION_EPOCH);
    let sensor = TickingSensor::new(ScriptedSensor::readings([(20.0, 50.0)]), clock.clone());

    let report = Monitor::new(sensor, clock, session_config(&dir, 0))
        .unwrap()
        .run(&CancelToken::new());

    assert_eq!(report.ticks, 0);
    assert_eq!(report.stop_cause, StopCause::Deadline);
    // Flush attempted, but an empty window has nothing to report.
    assert!(report.final_snapshot.is_none());
    assert!(!dir.path().join("stats.json").exists());

    // The session still initialized its raw log.
    let csv = std::fs::read_to_string(dir.path().join("datos.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn bounded_buffer_limits_the_statistics_window() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::at_epoch_seconds(SESSION_EPOCH);

    // Six readings through a capacity-4 window: statistics see only the
    // last four, while the raw log keeps all six.
    let script = ScriptedSensor::readings([
        (10.0, 30.0),
        (11.0, 31.0),
        (20.0, 50.0),
        (21.0, 51.0),
        (22.0, 52.0),
        (23.0, 53.0),
    ]);
    let sensor = TickingSensor::new(script, clock.clone());
    let config = session_config(&dir, 6).with_capacity(4);

    let report = Monitor::new(sensor, clock, config)
        .unwrap()
        .run(&CancelToken::new());

    let snapshot = report.final_snapshot.unwrap();
    assert_eq!(snapshot.total_count, 4);
    assert!((snapshot.temperature.min - 20.0).abs() < 1e-9);

    let csv = std::fs::read_to_string(dir.path().join("datos.csv")).unwrap();
    assert_eq!(csv.lines().count(), 7);
}
