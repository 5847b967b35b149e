use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn missing_settings(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("beatsomnia.json")
}

#[test]
fn calc_lists_bedtimes_for_seven_am() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(missing_settings(&dir))
        .args(["calc", "--mode", "plan-wake-up", "--time", "07:00", "--latency", "15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bedtime:"))
        .stdout(predicate::str::contains(
            "6 cycles  9h 0m  21:45  Optimal for most adults - full rest and recovery",
        ))
        .stdout(predicate::str::contains("1 cycles  1h 30m  05:15"));
}

#[test]
fn calc_json_is_an_array_of_results() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    let output = cmd
        .arg("--settings")
        .arg(missing_settings(&dir))
        .args([
            "calc", "--mode", "sleep-now", "--time", "22:10", "--latency", "15", "--cycles",
            "short", "--json",
        ])
        .output()
        .expect("run calc");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let results = value.as_array().expect("array");
    assert_eq!(results.len(), 3);
    assert_eq!(results[2]["cycles"], 4);
    assert_eq!(results[2]["total_sleep_minutes"], 360);
    assert_eq!(results[2]["total_sleep"], "6h 0m");
    assert_eq!(results[2]["result_time"], "04:25");
}

#[test]
fn invalid_latency_fails_with_range_message() {
    let dir = tempdir().expect("tempdir");

    for latency in ["0", "61", "abc", ""] {
        let mut cmd = cargo_bin_cmd!("beatsomnia");
        cmd.arg("--settings")
            .arg(missing_settings(&dir))
            .args(["calc", "--time", "07:00", "--latency", latency])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Please select a number between 1 and 60.",
            ));
    }
}

#[test]
fn plan_wake_up_requires_a_time() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(missing_settings(&dir))
        .args(["calc", "--mode", "plan-wake-up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--time is required"));
}

#[test]
fn malformed_time_is_rejected() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(missing_settings(&dir))
        .args(["calc", "--time", "25:99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid clock time '25:99'"));
}

#[test]
fn settings_supply_defaults_for_calc() {
    let dir = tempdir().expect("tempdir");
    let settings = dir.path().join("beatsomnia.json");
    fs::write(
        &settings,
        r#"{ "version": 1, "default_latency": 60, "cycle_set": "short", "start_mode": "plan_wake_up" }"#,
    )
    .expect("write settings");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(settings)
        .args(["calc", "--time", "07:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 cycles  9h 0m  21:00"))
        .stdout(predicate::str::contains("3 cycles").not());
}

#[test]
fn malformed_settings_fail_with_clear_error() {
    let dir = tempdir().expect("tempdir");
    let settings = dir.path().join("beatsomnia.json");
    fs::write(&settings, "{ not-valid-json ").expect("write invalid json");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(settings)
        .arg("terms")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn breathe_runs_to_completion() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(missing_settings(&dir))
        .args(["breathe", "--tick-ms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cycle 1 of 4: Inhale (through nose)"))
        .stdout(predicate::str::contains("Breathing exercise complete."));
}

#[test]
fn sos_runs_to_completion() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(missing_settings(&dir))
        .args(["sos", "--tick-ms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 3 of 3: Acupressure Points"))
        .stdout(predicate::str::contains("Sleep SOS complete."));
}

#[test]
fn zero_tick_is_rejected() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(missing_settings(&dir))
        .args(["breathe", "--tick-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tick-ms must be greater than zero"));
}

#[test]
fn terms_prints_policy() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(missing_settings(&dir))
        .arg("terms")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terms and Privacy Policy"))
        .stdout(predicate::str::contains("info@beatsomnia.com"));
}

#[test]
fn tips_filter_by_topic() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("beatsomnia");
    cmd.arg("--settings")
        .arg(missing_settings(&dir))
        .args(["tips", "foods"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bananas"))
        .stdout(predicate::str::contains("20-Minute Rule").not());
}
