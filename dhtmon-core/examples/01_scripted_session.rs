//! Scripted Monitoring Session Example
//!
//! Runs a short, fully deterministic monitoring session against a
//! scripted sensor and shows the files the engine produces.
//!
//! ## What You'll Learn
//!
//! - Configuring a session (interval, duration, capacity, paths)
//! - How failed acquisitions show up in the raw log and the success rate
//! - The final statistics flush that runs on every exit path
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_scripted_session
//! ```

use std::time::Duration;

use dhtmon_core::{
    AcquisitionFailure, CancelToken, Monitor, MonitorConfig, ScriptedSensor, SystemClock,
};

fn main() {
    let out_dir = std::env::temp_dir().join("dhtmon_example");
    std::fs::create_dir_all(&out_dir).expect("create output directory");

    let config = MonitorConfig::default()
        .with_interval(Duration::from_millis(50))
        .with_duration(Duration::from_millis(500))
        .with_capacity(100)
        .with_stats_every(4)
        .with_paths(out_dir.join("datos_dht11.csv"), out_dir.join("estadisticas_dht11.json"));

    // A sensor that mostly works, drops one reading and faults once:
    // the shape of a real DHT11 on a long wire.
    let sensor = ScriptedSensor::new([
        Ok((21.0, 48.0)),
        Ok((21.2, 48.5)),
        Err(AcquisitionFailure::NoReading),
        Ok((21.5, 49.0)),
        Err(AcquisitionFailure::Fault("checksum mismatch".into())),
        Ok((21.7, 49.5)),
        Ok((21.9, 50.0)),
        Ok((22.0, 50.2)),
    ]);

    println!("=== DhtMon scripted session ===\n");

    let monitor = Monitor::new(sensor, SystemClock, config).expect("initialize session files");
    let report = monitor.run(&CancelToken::new());

    println!("session ended: {}", report.stop_cause);
    println!("ticks performed: {}", report.ticks);

    match &report.final_snapshot {
        Some(snapshot) => println!("\n{snapshot}"),
        None => println!("no successful readings this session"),
    }

    println!("\nfiles written:");
    println!("  raw log:  {}", out_dir.join("datos_dht11.csv").display());
    println!(
        "  snapshot: {}",
        out_dir.join("estadisticas_dht11.json").display()
    );
}
