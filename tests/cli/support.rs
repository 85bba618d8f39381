use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

pub const ALLOCATION: &str = r#"{
    "Q1": { "type": "partial", "score": 10, "answer": "42" },
    "Q2": {
        "A": { "type": "full-or-zero", "score": 5 },
        "B": { "type": "full-or-zero", "score": 5 }
    }
}"#;

pub const GRADEBOOK: &str = "Report 1,,\nStudentID,Name,Grade\n1234567,Yamada Taro,\n7654321,Sato Hanako,\n";

/// Get a Command for saiten
pub fn saiten() -> Command {
    cargo_bin_cmd!("saiten")
}

/// A temp base directory holding `math/report1` with two students, plus an
/// isolated config directory
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempdir().unwrap();
        let root = dir.path().join("assignments").join("math").join("report1");
        for student in ["Yamada Taro(1234567)", "Sato Hanako(7654321)"] {
            fs::create_dir_all(root.join(student)).unwrap();
        }
        fs::write(root.join("allocation.json"), ALLOCATION).unwrap();
        fs::write(root.join("grades.csv"), GRADEBOOK).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn base(&self) -> PathBuf {
        self.path().join("assignments")
    }

    pub fn root(&self) -> PathBuf {
        self.base().join("math").join("report1")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.path().join("config")
    }

    /// saiten running in the fixture with `--base-dir` unset, so the
    /// configured (default relative) base directory is used
    pub fn cmd(&self) -> Command {
        let mut cmd = saiten();
        cmd.current_dir(self.path())
            .env("SAITEN_CONFIG_DIR", self.config_dir())
            .env_remove("SAITEN_BASE_DIR")
            .env_remove("SAITEN_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root().join(name)).unwrap()
    }

    pub fn json_stdout(output: &std::process::Output) -> serde_json::Value {
        serde_json::from_slice(&output.stdout).unwrap()
    }
}
