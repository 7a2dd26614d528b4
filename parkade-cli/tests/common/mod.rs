//! Common test utilities for CLI integration tests.
//!
//! Every test gets its own data directory and working directory, and the
//! `PARKADE_*` variables of the invoking shell are cleared so that only the
//! flags a test passes take effect.

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PARKADE_ENV: &[&str] = &[
    "PARKADE_DATA_DIR",
    "PARKADE_BIND",
    "PARKADE_WORKERS",
    "PARKADE_MAXIMUM_LOCK_WAIT_SECONDS",
    "PARKADE_DISABLE_AUTOINIT",
    "PARKADE_OUTPUT_FORMAT",
    "PARKADE_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory, used as working directory.
    pub temp_path: PathBuf,
    /// Path to the parkade data directory (not created until first use).
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("parkade-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with a clean environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("parkade").expect("Failed to find parkade binary");
        for var in PARKADE_ENV {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, yaml: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), yaml).expect("Failed to write config");
    }

    /// Run a command with `--format json` and parse stdout.
    ///
    /// # Panics
    /// Panics if the command fails or prints invalid JSON.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .command()
            .arg("--format")
            .arg("json")
            .args(args)
            .output()
            .expect("Failed to run parkade");

        assert!(
            output.status.success(),
            "parkade {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }

    /// Register a lot with one floor and returns `(lot_id, floor_id)`.
    pub fn lot_with_floor(&self, name: &str) -> (i64, i64) {
        let lots = self.json(&["lot", "create", "--name", name, "--address", "1 Main St"]);
        let lot_id = lots[0]["id"].as_i64().expect("lot id");

        let floors = self.json(&["floor", "add", "--lot", &lot_id.to_string(), "--number", "0"]);
        let floor_id = floors[0]["id"].as_i64().expect("floor id");

        (lot_id, floor_id)
    }

    /// Register a spot and returns its id.
    pub fn add_spot(&self, floor_id: i64, number: &str, spot_type: &str) -> i64 {
        let spots = self.json(&[
            "spot",
            "add",
            "--floor",
            &floor_id.to_string(),
            "--number",
            number,
            "--type",
            spot_type,
        ]);
        spots[0]["id"].as_i64().expect("spot id")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
