//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Algorithm used by integration tests (the fastest one)
#[allow(dead_code)]
pub const TEST_ALGORITHM: &str = "falcon-512";

/// Test ledger context
///
/// Creates a temporary data directory and runs the falcondag binary
/// against it.
pub struct TestLedger {
    /// Temporary data directory
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestLedger {
    /// Create a new, uninitialized data directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a data directory initialized with the given genesis funds
    pub fn funded(funds: &[(&str, u64)]) -> Self {
        let ledger = Self::new();
        let mut args = vec![
            "init".to_string(),
            "--algorithm".to_string(),
            TEST_ALGORITHM.to_string(),
        ];
        for (name, amount) in funds {
            args.push("--fund".to_string());
            args.push(format!("{name}={amount}"));
        }
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        ledger.run_ok(&args);
        ledger
    }

    /// Get the path to the data directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Run falcondag with `--data-dir` pointing at this ledger
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_falcondag"))
            .arg("--data-dir")
            .arg(self.dir.path())
            .args(args)
            .env_remove("FALCONDAG_DATA_DIR")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute falcondag")
    }

    /// Run falcondag, assert success, and return trimmed stdout
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "falcondag {args:?} failed:\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Run falcondag with `--json` and parse stdout
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let stdout = self.run_ok(&full);
        serde_json::from_str(&stdout).expect("Output is not valid JSON")
    }

    /// Balance of a key or address
    pub fn balance(&self, account: &str) -> u64 {
        self.run_ok(&["balance", account])
            .parse()
            .expect("Balance is not a number")
    }

    /// Address of a stored key
    pub fn address(&self, name: &str) -> String {
        self.run_ok(&["address", name])
    }

    /// Check if a file exists in the data directory
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the data directory
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write a file in the data directory
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write file");
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}
