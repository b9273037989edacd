//! Test support utilities for kvsecrets integration tests.
//!
//! Provides an isolated runner environment and a mock vault.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated working directory and runner files.
///
/// Child processes get `GITHUB_ENV` and `GITHUB_OUTPUT` pointing into the
/// temp dir and run with `.current_dir()`, so tests can run in parallel.
pub struct Test {
    /// Working directory of the step
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Path of the runner's environment file.
    pub fn env_file(&self) -> PathBuf {
        self.dir.path().join("github_env")
    }

    /// Path of the runner's output file.
    pub fn output_file(&self) -> PathBuf {
        self.dir.path().join("github_output")
    }

    /// Write a file into the working directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }

    /// Variables exported to the runner, parsed from the env file.
    pub fn exported(&self) -> Vec<(String, String)> {
        parse_file_commands(&self.env_file())
    }

    /// Step outputs, parsed from the output file.
    pub fn outputs(&self) -> Vec<(String, String)> {
        parse_file_commands(&self.output_file())
    }
}

/// Parse `NAME<<DELIM\nvalue\nDELIM\n` entries.
fn parse_file_commands(path: &std::path::Path) -> Vec<(String, String)> {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut lines = contents.lines();
    while let Some(header) = lines.next() {
        let (name, delimiter) = header
            .split_once("<<")
            .expect("file command header without delimiter");
        let mut value = Vec::new();
        for line in lines.by_ref() {
            if line == delimiter {
                break;
            }
            value.push(line);
        }
        entries.push((name.to_string(), value.join("\n")));
    }
    entries.sort();
    entries
}
