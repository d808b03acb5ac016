//! Common test utilities for menutree CLI tests.
//!
//! - `Sandbox`: temp working directory with an isolated config dir
//! - Fixtures: reusable JSON inputs

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

/// Isolated working directory for running the menutree binary.
///
/// HOME and XDG_CONFIG_HOME point into the sandbox so a developer's own
/// `menutree/config.toml` never leaks into a test.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the sandbox.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_menutree"));
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env_remove("RUST_LOG");
        for key in [
            "MENUTREE_CHECK_STRICTLY",
            "MENUTREE_PAGE_SIZE",
            "MENUTREE_ID_KEY",
            "MENUTREE_PARENT_ID_KEY",
            "MENUTREE_NAME_KEY",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }

    /// Run with `stdin` piped in.
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }

    /// Run, assert success and parse stdout as JSON.
    pub fn run_json(&self, args: &[&str]) -> Value {
        json_stdout(&self.run(args))
    }
}

pub fn json_stdout(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Values of `key` across a list of JSON objects
pub fn column(rows: &Value, key: &str) -> Vec<Value> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row[key].clone())
        .collect()
}
