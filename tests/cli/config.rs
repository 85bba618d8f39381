use crate::cli::support::Fixture;
use predicates::prelude::*;

#[test]
fn test_config_show_defaults() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args(["--format", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = Fixture::json_stdout(&output);
    assert_eq!(json["base_dir"], "assignments");
    assert_eq!(json["gradebook"]["id_header"], "StudentID");
    assert_eq!(json["gradebook"]["grade_header"], "Grade");
}

#[test]
fn test_set_base_dir_copies_subjects() {
    let fx = Fixture::new();
    let new_base = fx.path().join("moved");

    fx.cmd()
        .arg("config")
        .arg("set-base-dir")
        .arg(&new_base)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 2 files"));

    assert!(new_base.join("math/report1/allocation.json").is_file());
    assert!(fx.config_dir().join("config.toml").is_file());

    fx.cmd()
        .arg("subjects")
        .assert()
        .success()
        .stdout("math\n");
}

#[test]
fn test_set_base_dir_no_copy() {
    let fx = Fixture::new();
    let new_base = fx.path().join("fresh");

    fx.cmd()
        .arg("config")
        .arg("set-base-dir")
        .arg(&new_base)
        .arg("--no-copy")
        .assert()
        .success();

    assert!(new_base.is_dir());
    fx.cmd().arg("subjects").assert().success().stdout("");
}

#[test]
fn test_unparseable_config_is_reported() {
    let fx = Fixture::new();
    std::fs::create_dir_all(fx.config_dir()).unwrap();
    std::fs::write(fx.config_dir().join("config.toml"), "[store\n").unwrap();

    fx.cmd()
        .arg("subjects")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse config"));
}
