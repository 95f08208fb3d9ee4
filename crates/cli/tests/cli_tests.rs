//! CLI integration tests

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_delay-cli"))
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = cli().arg("--help").output().expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("Flight Delay Predictor"), "Should show app name");
    assert!(stdout.contains("train"), "Should show train command");
    assert!(stdout.contains("encode"), "Should show encode command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = cli().arg("--version").output().expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("delay-cli"), "Should show binary name");
}

/// Test encode output for a valid record
#[test]
fn test_encode_json() {
    let output = cli()
        .args([
            "--format", "json", "encode", "--airline", "Copa Air", "--flight-type", "I",
            "--month", "12",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["valid"], true);
    assert_eq!(value["features"].as_array().unwrap().len(), 10);
    assert_eq!(value["features"][9]["column"], "OPERA_Copa Air");
    assert_eq!(value["features"][9]["value"], 1.0);
}

/// Test encode flags an out-of-range month
#[test]
fn test_encode_invalid_month() {
    let output = cli()
        .args([
            "--format", "json", "encode", "--airline", "LATAM", "--flight-type", "I", "--month",
            "14",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["valid"], false);
}

/// Test train fails cleanly without a dataset
#[test]
fn test_train_missing_dataset() {
    let dir = TempDir::new().unwrap();
    let output = cli()
        .args(["train", "--repo-root"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Train should fail without data");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr was: {}", stderr);
}

/// Test train reports held-out metrics as JSON
#[test]
fn test_train_json_report() {
    let dir = TempDir::new().unwrap();
    let airlines = ["Latin American Wings", "Grupo LATAM", "Sky Airline", "Copa Air"];
    let mut csv = String::from("Fecha-I,Fecha-O,MES,TIPOVUELO,OPERA\n");
    for i in 0..96usize {
        let flight_type = if (i / 48) == 0 { "I" } else { "N" };
        let actual = if i % 4 == 3 { "10:40:00" } else { "10:00:00" };
        csv.push_str(&format!(
            "2017-05-02 10:00:00,2017-05-02 {},{},{},{}\n",
            actual,
            (i / 4) % 12 + 1,
            flight_type,
            airlines[i % 4]
        ));
    }
    let data = dir.path().join("flights.csv");
    fs::write(&data, csv).unwrap();

    let output = cli()
        .args(["--format", "json", "train", "--data"])
        .arg(&data)
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["rows"], 96);
    // ceil(96 * 0.33) = 32
    assert_eq!(value["report"]["rows"], 32);
    assert_eq!(value["hyperparameters"]["learning_rate"].as_f64().unwrap() as f32, 0.01);
}
