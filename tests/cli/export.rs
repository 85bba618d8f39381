use crate::cli::support::Fixture;
use predicates::prelude::*;

#[test]
fn test_export_excludes_app_files() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=5"])
        .assert()
        .success();
    let dest = fx.path().join("upload");

    fx.cmd()
        .args(["export", "math", "report1"])
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    assert!(dest.join("grades.csv").is_file());
    assert!(dest.join("Yamada Taro(1234567)").is_dir());
    assert!(!dest.join("detailed_grades.json").exists());
    assert!(!dest.join("allocation.json").exists());
}

#[test]
fn test_export_with_app_files_json() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=5"])
        .assert()
        .success();
    let dest = fx.path().join("backup");

    let output = fx
        .cmd()
        .args(["--format", "json", "export", "math", "report1"])
        .arg(&dest)
        .arg("--include-app-files")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = Fixture::json_stdout(&output);
    assert_eq!(json["status"], "exported");
    assert_eq!(json["files"], 3);
    assert!(dest.join("detailed_grades.json").is_file());
}

#[test]
fn test_export_default_destination() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["export", "math", "report1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("grading_result_"));

    let exported = std::fs::read_dir(fx.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().starts_with("grading_result_"));
    assert!(exported);
}
