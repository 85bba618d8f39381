use crate::cli::support::{Fixture, GRADEBOOK};
use predicates::prelude::*;

// ============================================================================
// grade command tests
// ============================================================================

#[test]
fn test_grade_writes_ledger_and_gradebook() {
    let fx = Fixture::new();

    fx.cmd()
        .args([
            "grade", "math", "report1", "1234567", "-s", "Q1=7", "-s", "Q2_A=yes", "-s",
            "Q2_B=no",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Yamada Taro(1234567): 12"))
        .stdout(predicate::str::contains("gradebook: set to 12"));

    let ledger: serde_json::Value = serde_json::from_str(&fx.read("detailed_grades.json")).unwrap();
    assert_eq!(
        ledger,
        serde_json::json!({
            "Yamada Taro(1234567)": { "Q1": 7, "Q2_A": 5, "Q2_B": 0 }
        })
    );
    assert_eq!(
        fx.read("grades.csv"),
        GRADEBOOK.replace("1234567,Yamada Taro,", "1234567,Yamada Taro,12")
    );
}

#[test]
fn test_grade_json_reports_next_student() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args([
            "--format", "json", "grade", "math", "report1", "7654321", "-s", "Q1=10",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = Fixture::json_stdout(&output);
    assert_eq!(json["student"], "Sato Hanako(7654321)");
    assert_eq!(json["total"], 10);
    assert_eq!(json["scores"], serde_json::json!({ "Q1": 10, "Q2_A": 0, "Q2_B": 0 }));
    assert_eq!(json["gradebook"]["status"], "updated");
    assert_eq!(json["gradebook"]["row"], 3);
    assert_eq!(json["next"], "Yamada Taro(1234567)");
    assert_eq!(json["progress"]["graded"], 1);
}

#[test]
fn test_regrade_replaces_scores() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=7", "-s", "Q2_A=yes"])
        .assert()
        .success();
    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gradebook: 12 -> 3"));

    let ledger: serde_json::Value = serde_json::from_str(&fx.read("detailed_grades.json")).unwrap();
    assert_eq!(ledger["Yamada Taro(1234567)"]["Q2_A"], 0);
}

#[test]
fn test_amend_keeps_saved_scores() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=7", "-s", "Q2_A=yes"])
        .assert()
        .success();
    fx.cmd()
        .args([
            "grade", "math", "report1", "1234567", "-s", "Q2_B=yes", "--amend",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Yamada Taro(1234567): 17"));
}

#[test]
fn test_same_grade_twice_is_unchanged() {
    let fx = Fixture::new();

    for _ in 0..2 {
        fx.cmd()
            .args(["grade", "math", "report1", "1234567", "-s", "Q1=4"])
            .assert()
            .success();
    }
    let ledger = fx.read("detailed_grades.json");
    let gradebook = fx.read("grades.csv");

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gradebook: unchanged"));

    assert_eq!(fx.read("detailed_grades.json"), ledger);
    assert_eq!(fx.read("grades.csv"), gradebook);
}

#[test]
fn test_out_of_range_is_usage_error_and_writes_nothing() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=11"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("out of range"));

    assert!(!fx.root().join("detailed_grades.json").exists());
    assert_eq!(fx.read("grades.csv"), GRADEBOOK);
}

#[test]
fn test_full_or_zero_rejects_partial_points() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q2_A=3"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_criterion_is_rejected() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q9=1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Q9"));
}

#[test]
fn test_malformed_score_argument() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_gradebook_is_data_error() {
    let fx = Fixture::new();
    std::fs::remove_file(fx.root().join("grades.csv")).unwrap();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=5"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("gradebook not found"));

    assert!(!fx.root().join("detailed_grades.json").exists());
}

#[test]
fn test_student_absent_from_gradebook() {
    let fx = Fixture::new();
    std::fs::create_dir_all(fx.root().join("Late Student(5555555)")).unwrap();

    fx.cmd()
        .args(["grade", "math", "report1", "5555555", "-s", "Q1=5"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("5555555"));
}

#[test]
fn test_corrupt_ledger_is_data_error() {
    let fx = Fixture::new();
    std::fs::write(fx.root().join("detailed_grades.json"), "{not json").unwrap();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=5"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("corrupt grade ledger"));

    assert_eq!(fx.read("detailed_grades.json"), "{not json");
}

#[test]
fn test_localized_gradebook_headers_from_config() {
    let fx = Fixture::new();
    std::fs::write(
        fx.root().join("grades.csv"),
        "学生番号,氏名,成績\n1234567,山田,\n",
    )
    .unwrap();

    fx.cmd()
        .args([
            "config",
            "set-gradebook",
            "--id-header",
            "学生番号",
            "--grade-header",
            "成績",
        ])
        .assert()
        .success();

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "Q1=9"])
        .assert()
        .success();

    assert_eq!(fx.read("grades.csv"), "学生番号,氏名,成績\n1234567,山田,9\n");
}
