#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use daybook::task::Task;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway daybook root
pub struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(".daybook.toml", contents)
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.dir.path().join(".daybook").join("tasks.jsonl")
    }

    pub fn read_tasks(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        let path = self.tasks_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)?;
        let mut tasks = Vec::new();
        for line in contents.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            tasks.push(serde_json::from_str(trimmed)?);
        }
        Ok(tasks)
    }

    /// `daybook` pointed at this root through `--root`
    pub fn cmd(&self) -> Command {
        let mut cmd = daybook_cmd();
        cmd.arg("--root").arg(self.path());
        cmd
    }

    /// Run a command with `--json`, expect success and return the envelope.
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

    /// Create a task and return its id.
    pub fn new_task(&self, title: &str, date: &str, start: &str, end: &str) -> String {
        let value = self.json(&["new", title, "--date", date, "--start", start, "--end", end]);
        value["data"]["id"].as_str().expect("task id").to_string()
    }
}

pub fn daybook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("daybook").expect("binary");
    cmd.env_remove("DAYBOOK_ROOT").env_remove("RUST_LOG");
    cmd
}

pub fn titles(value: &Value) -> Vec<String> {
    value["data"]["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|task| task["title"].as_str().expect("title").to_string())
        .collect()
}
