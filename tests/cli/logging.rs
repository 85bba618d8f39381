use crate::cli::support::Fixture;
use predicates::prelude::*;

// ============================================================================
// Logging flag tests
// ============================================================================

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["--log-level", "debug", "subjects"])
        .assert()
        .success()
        .stderr(predicate::str::contains("load_config"));
}

#[test]
fn test_default_level_hides_debug_messages() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("subjects")
        .assert()
        .success()
        .stderr(predicate::str::contains("load_config").not());
}

#[test]
fn test_verbose_logs_ledger_write() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["--verbose", "grade", "math", "report1", "1234567", "-s", "Q1=1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ledger_saved"));
}

#[test]
fn test_log_json_emits_json_lines() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args(["--log-level", "debug", "--log-json", "subjects"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(first).is_ok());
}
