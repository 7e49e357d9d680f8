use std::fs;
use std::path::PathBuf;

use telegrapher::prelude::*;

fn scratch_file(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("telegrapher-{}-{}", std::process::id(), name));
    path
}

#[test]
fn configuration_survives_file_round_trip() {
    let config = LineConfiguration {
        source: VoltageSource::pulse(3.3, 1e-6, 1e-7),
        start_termination: StartTermination::Capacitor { capacitance: 4.7e-9 },
        end_termination: EndTermination::Inductor { inductance: 1e-5 },
        segment_count: 250,
        ..LineConfiguration::default()
    };
    let path = scratch_file("round-trip.json");

    config.to_json_file(&path).unwrap();
    let loaded = LineConfiguration::from_json_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn hand_written_file_drives_integrator() {
    let path = scratch_file("hand-written.json");
    fs::write(&path, r#"{
        "source": { "kind": "sine", "voltage": 1.0, "period": 1e-6, "pulse_duration": 0.0 },
        "start_termination": { "type": "resistor", "resistance": 50.0 },
        "end_termination": { "type": "open_circuit" },
        "timestep": 1e-9,
        "segment_count": 16,
        "resistance": 0.0,
        "conductance": 0.0,
        "inductance": 175e-6,
        "capacitance": 15e-9
    }"#).unwrap();

    let config = LineConfiguration::from_json_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.start_termination, StartTermination::Resistor { resistance: 50.0 });
    let mut line = LineIntegrator::new(config).unwrap();
    line.advance(10);
    assert_eq!(line.voltages().len(), 16);
    assert_eq!(line.currents()[15], 0.0);
}

#[test]
fn unknown_network_is_a_json_error() {
    let path = scratch_file("unknown.json");
    let text = serde_json::to_string(&LineConfiguration::default())
        .unwrap()
        .replace("open_circuit", "superconductor");
    fs::write(&path, text).unwrap();

    let result = LineConfiguration::from_json_file(&path);
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = LineConfiguration::from_json_file(scratch_file("does-not-exist.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}
