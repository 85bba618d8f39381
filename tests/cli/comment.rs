use crate::cli::support::Fixture;
use predicates::prelude::*;

#[test]
fn test_comment_set_and_read() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["comment", "math", "report1", "1234567"])
        .assert()
        .success()
        .stdout("");

    fx.cmd()
        .args([
            "comment",
            "math",
            "report1",
            "1234567",
            "--set",
            "Good work on Q2.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved comment"));

    fx.cmd()
        .args(["comment", "math", "report1", "1234567"])
        .assert()
        .success()
        .stdout("Good work on Q2.\n");

    let written = std::fs::read_to_string(
        fx.root().join("Yamada Taro(1234567)").join("comments.txt"),
    )
    .unwrap();
    assert_eq!(written, "Good work on Q2.");
}

#[test]
fn test_comment_json() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args([
            "--format", "json", "comment", "math", "report1", "7654321", "--set", "要再提出",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = Fixture::json_stdout(&output);
    assert_eq!(json["student"], "Sato Hanako(7654321)");
    assert_eq!(json["comment"], "要再提出");
}
