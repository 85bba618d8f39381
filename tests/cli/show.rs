use crate::cli::support::Fixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_show_ungraded_student() {
    let fx = Fixture::new();
    let student = fx.root().join("Yamada Taro(1234567)");
    fs::write(student.join("Yamada_submissionText.html"), "<p>answer</p>").unwrap();

    fx.cmd()
        .args(["show", "math", "report1", "Yamada Taro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Yamada Taro (1234567)"))
        .stdout(predicate::str::contains("Yamada_submissionText.html"))
        .stdout(predicate::str::contains("not graded"))
        .stdout(predicate::str::contains("gradebook: -"));
}

#[test]
fn test_show_json_after_grading() {
    let fx = Fixture::new();
    let attachments = fx.root().join("Sato Hanako(7654321)").join("提出物の添付ファイル");
    fs::create_dir_all(&attachments).unwrap();
    fs::write(attachments.join("report.pdf"), "%PDF").unwrap();

    fx.cmd()
        .args(["grade", "math", "report1", "7654321", "-s", "Q1=6"])
        .assert()
        .success();

    let output = fx
        .cmd()
        .args(["--format", "json", "show", "math", "report1", "7654321"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = Fixture::json_stdout(&output);
    assert_eq!(json["id"], "7654321");
    assert_eq!(json["total"], 6);
    assert_eq!(json["gradebook"], "6");
    assert_eq!(json["scores"]["Q1"], 6);
    assert_eq!(json["submission"]["pdfs"].as_array().unwrap().len(), 1);
    assert!(json["comment"].is_null());
}

#[test]
fn test_show_without_gradebook() {
    let fx = Fixture::new();
    fs::remove_file(fx.root().join("grades.csv")).unwrap();

    fx.cmd()
        .args(["show", "math", "report1", "1234567"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gradebook: missing"));
}

#[test]
fn test_ambiguous_display_name() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.root().join("Sato Hanako(1111111)")).unwrap();

    fx.cmd()
        .args(["show", "math", "report1", "Sato Hanako"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("use the student ID"));
}
