use crate::cli::support::Fixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_schema_show_lists_criteria_in_order() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args(["--format", "json", "schema", "show", "math", "report1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = Fixture::json_stdout(&output);
    let keys: Vec<&str> = json["criteria"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["Q1", "Q2_A", "Q2_B"]);
    assert_eq!(json["criteria"][0]["answer"], "42");
    assert_eq!(json["criteria"][1]["type"], "full-or-zero");
    assert_eq!(json["max_total"], 20);
    assert_eq!(json["depth"], 2);
}

#[test]
fn test_schema_show_human() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["schema", "show", "math", "report1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q2 > A"))
        .stdout(predicate::str::contains("answer: 42"))
        .stdout(predicate::str::contains("3 criteria, max total 20, depth 2"));
}

#[test]
fn test_schema_check_valid_file() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("schema")
        .arg("check")
        .arg(fx.root().join("allocation.json"))
        .assert()
        .success()
        .stdout("ok: 3 criteria, max total 20, depth 2\n");
}

#[test]
fn test_schema_check_rejects_malformed_leaf() {
    let fx = Fixture::new();
    let file = fx.path().join("bad.json");
    fs::write(&file, r#"{"Q1": {"type": "bonus", "score": 3}}"#).unwrap();

    fx.cmd()
        .arg("schema")
        .arg("check")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not a valid allocation schema"))
        .stderr(predicate::str::contains("caused by"));
}

#[test]
fn test_schema_check_missing_file() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["schema", "check", "nope.json"])
        .assert()
        .code(3);
}

#[test]
fn test_schema_set_installs_file() {
    let fx = Fixture::new();
    fs::remove_file(fx.root().join("allocation.json")).unwrap();
    let file = fx.path().join("new.json");
    fs::write(
        &file,
        r#"{"問1": {"type": "partial", "score": 6}, "問2": {"type": "full-or-zero", "score": 4}}"#,
    )
    .unwrap();

    let output = fx
        .cmd()
        .args(["--format", "json", "schema", "set", "math", "report1"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = Fixture::json_stdout(&output);
    assert_eq!(json["status"], "saved");
    assert_eq!(json["criteria"], 2);
    assert_eq!(json["max_total"], 10);

    let installed = fs::read_to_string(fx.root().join("allocation.json")).unwrap();
    assert!(installed.starts_with("{\n    \"問1\": {\n        \"type\": \"partial\""));

    fx.cmd()
        .args(["grade", "math", "report1", "1234567", "-s", "問1=5", "-s", "問2=yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1234567): 9"));
}

#[test]
fn test_schema_set_rejects_invalid_file() {
    let fx = Fixture::new();
    let before = fs::read_to_string(fx.root().join("allocation.json")).unwrap();
    let file = fx.path().join("bad.json");
    fs::write(&file, r#"{"Q1": {"type": "partial", "score": -1}}"#).unwrap();

    fx.cmd()
        .args(["schema", "set", "math", "report1"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid allocation schema"));

    assert_eq!(
        fs::read_to_string(fx.root().join("allocation.json")).unwrap(),
        before
    );
}

#[test]
fn test_schema_delete() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["schema", "delete", "math", "report1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));
    assert!(!fx.root().join("allocation.json").exists());

    fx.cmd()
        .args(["schema", "delete", "math", "report1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("allocation file not found"));
}
