use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs/scenarios")
        .join(name)
}

#[test]
fn descent_bin_exports_telemetry_and_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("descent.csv");
    let json_path = dir.path().join("descent.json");

    Command::cargo_bin("descent")
        .expect("descent bin")
        .args([
            "--scenario",
            scenario_path("mars_descent_bangbang.yaml").to_str().unwrap(),
            "--output",
            csv_path.to_str().unwrap(),
            "--summary",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("touchdown"));

    let csv = fs::read_to_string(&csv_path).expect("telemetry CSV");
    assert!(csv.starts_with("time_s,altitude_m,velocity_m_s,thrust_n,fuel_kg"));
    assert!(csv.lines().count() > 10);

    let json = fs::read_to_string(&json_path).expect("summary JSON");
    assert!(json.contains("\"landed\": true"));
}

#[test]
fn transfer_bin_reports_the_terminal_stage() {
    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args([
            "--scenario",
            scenario_path("hohmann_demo.yaml").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("TARGET_ORBIT"));
}

#[test]
fn transfer_bin_supports_the_radial_rate_detector() {
    Command::cargo_bin("transfer")
        .expect("transfer bin")
        .args([
            "--scenario",
            scenario_path("hohmann_demo.yaml").to_str().unwrap(),
            "--detector",
            "radial-rate",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("TARGET_ORBIT"));
}

#[test]
fn plot_descent_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("descent.csv");
    let png_path = dir.path().join("descent.png");

    let mut file = File::create(&csv_path).expect("csv create");
    writeln!(file, "time_s,altitude_m,velocity_m_s,thrust_n,fuel_kg").unwrap();
    for i in 0..30 {
        let t = i as f64 * 0.1;
        writeln!(
            file,
            "{t:.3},{:.3},{:.4},{:.2},{:.3}",
            1000.0 - 20.0 * t,
            -3.71 * t,
            if t > 2.0 { 15000.0 } else { 0.0 },
            600.0 - 0.5 * t,
        )
        .unwrap();
    }

    Command::cargo_bin("plot_descent")
        .expect("plot_descent bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "450",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}
