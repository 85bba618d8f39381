use crate::cli::support::{saiten, Fixture};
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    saiten()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: saiten"))
        .stdout(predicate::str::contains("grade"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_no_command_prints_version() {
    let fx = Fixture::new();

    fx.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("saiten"));
}

#[test]
fn test_json_error_envelope() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args(["--format", "json", "grade", "math", "report1", "1234567", "-s", "Q1=99"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], 2);
    assert_eq!(json["error"]["type"], "out_of_range");
}

#[test]
fn test_json_envelope_for_parse_errors() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args(["--format", "json", "grade", "math"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_quiet_suppresses_error_text() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["--quiet", "assignments", "history"])
        .assert()
        .code(3)
        .stderr("");
}
