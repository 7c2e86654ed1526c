#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway data directory for one test
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write file");
        path
    }

    /// `tb --dir <board>` with a clean environment
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tb").expect("binary");
        cmd.env_remove("TASKBOARD_DIR")
            .env_remove("RUST_LOG")
            .current_dir(self.dir.path())
            .arg("--dir")
            .arg(self.dir.path());
        cmd
    }

    /// Run with `--json`, assert success, return the envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json envelope")
    }

    /// Add a task and return its id.
    pub fn add(&self, args: &[&str]) -> String {
        let mut full = vec!["add"];
        full.extend_from_slice(args);
        let value = self.json(&full);
        value["data"]["id"].as_str().expect("task id").to_string()
    }
}

pub fn titles(tasks: &Value) -> Vec<String> {
    tasks
        .as_array()
        .expect("task array")
        .iter()
        .map(|task| task["title"].as_str().expect("title").to_string())
        .collect()
}
