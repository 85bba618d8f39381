use crate::cli::support::Fixture;
use predicates::prelude::*;
use std::fs;

// ============================================================================
// subjects / assignments / students / status
// ============================================================================

#[test]
fn test_subjects_and_assignments() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.base().join("physics").join("lab2")).unwrap();

    fx.cmd()
        .arg("subjects")
        .assert()
        .success()
        .stdout("math\nphysics\n");

    fx.cmd()
        .args(["assignments", "math"])
        .assert()
        .success()
        .stdout("report1\n");
}

#[test]
fn test_unknown_subject_is_data_error() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["assignments", "history"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("subject not found: history"));
}

#[test]
fn test_base_dir_flag_overrides_config() {
    let fx = Fixture::new();
    let other = fx.path().join("elsewhere");
    fs::create_dir_all(other.join("chemistry")).unwrap();

    fx.cmd()
        .arg("--base-dir")
        .arg(&other)
        .arg("subjects")
        .assert()
        .success()
        .stdout("chemistry\n");

    fx.cmd()
        .env("SAITEN_BASE_DIR", &other)
        .arg("subjects")
        .assert()
        .success()
        .stdout("chemistry\n");
}

#[test]
fn test_missing_base_dir_is_not_created() {
    let fx = Fixture::new();
    let typo = fx.path().join("asignments");

    fx.cmd()
        .arg("--base-dir")
        .arg(&typo)
        .arg("subjects")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("base directory not found"));

    assert!(!typo.exists());
}

#[test]
fn test_students_marks_graded() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=7"])
        .assert()
        .success();

    fx.cmd()
        .args(["students", "math", "report1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Sato Hanako(7654321)"))
        .stdout(predicate::str::contains("[x] Yamada Taro(1234567)  7"));
}

#[test]
fn test_status_json() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["grade", "math", "report1", "Sato Hanako", "-s", "Q2_A=yes"])
        .assert()
        .success();

    let output = fx
        .cmd()
        .args(["--format", "json", "status", "math", "report1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = Fixture::json_stdout(&output);
    assert_eq!(json["graded"], 1);
    assert_eq!(json["total"], 2);
    assert_eq!(json["pending"], serde_json::json!(["Yamada Taro(1234567)"]));
    assert_eq!(json["max_total"], 20);
    assert_eq!(json["gradebook"], true);
}
