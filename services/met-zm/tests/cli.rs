//! Runs the met-zm binary end to end.

use std::process::Command;

use test_utils::{create_test_snapshot, fixtures::axes, fixtures::control, write_control, write_snapshot};

fn met_zm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_met-zm"))
}

#[test]
fn test_writes_table() {
    let dir = tempfile::tempdir().unwrap();
    let met = write_snapshot(
        dir.path(),
        "met.json",
        &create_test_snapshot(&axes::LON_GLOBAL, &axes::LAT_COARSE, &axes::P_LEVELS, 0.0),
    );
    let ctl = write_control(control::REGULAR);
    let out = dir.path().join("zm.tab");

    let status = met_zm()
        .arg(ctl.path())
        .arg(&out)
        .arg(&met)
        .arg(dir.path().join("missing.json"))
        .args(["--set", "ZM_DLAT=90", "--log-level", "warn"])
        .status()
        .unwrap();
    assert!(status.success());

    let text = std::fs::read_to_string(&out).unwrap();
    let rows: Vec<&str> = text
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();
    // Three levels, latitude bins -90, 0, 90
    assert_eq!(rows.len(), 9);
    assert!(rows.iter().all(|r| r.ends_with(" 4 4 4")));
}

#[test]
fn test_json_logs_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let met = write_snapshot(
        dir.path(),
        "met.json",
        &create_test_snapshot(&axes::LON_GLOBAL, &axes::LAT_COARSE, &axes::P_LEVELS, 0.0),
    );
    let output = met_zm()
        .arg("-")
        .arg(dir.path().join("zm.tab"))
        .arg(&met)
        .args(["--log-level", "info", "--log-json"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let first = stderr.lines().next().unwrap();
    assert!(first.starts_with('{'), "{}", first);
    assert!(stderr.contains("Wrote zonal means"));
}

#[test]
fn test_missing_arguments_fail() {
    let status = met_zm().arg("-").arg("zm.tab").status().unwrap();
    assert!(!status.success());
}

#[test]
fn test_no_readable_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("zm.tab");
    let status = met_zm()
        .arg("-")
        .arg(&out)
        .arg(dir.path().join("missing.json"))
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!out.exists());
}

#[test]
fn test_capacity_exceeded_fails() {
    let dir = tempfile::tempdir().unwrap();
    let met = write_snapshot(
        dir.path(),
        "met.json",
        &create_test_snapshot(&axes::LON_GLOBAL, &axes::LAT_COARSE, &axes::P_LEVELS, 0.0),
    );
    let status = met_zm()
        .arg("-")
        .arg(dir.path().join("zm.tab"))
        .arg(&met)
        .args(["--set", "ZM_MAX_LEVELS=2"])
        .status()
        .unwrap();
    assert!(!status.success());
}
