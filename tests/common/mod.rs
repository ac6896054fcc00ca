//! Shared testing utilities for storygrid CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `storygrid` binary in the work directory.
    ///
    /// The host's `GEMINI_API_KEY` is removed so only keys set by the test are seen.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("storygrid").expect("Failed to locate storygrid binary");
        cmd.current_dir(self.work_dir())
            .env("HOME", self.root.path())
            .env_remove("GEMINI_API_KEY")
            .env_remove("STORYGRID_LOG");
        cmd
    }

    /// Path to the .storygrid directory in the work directory.
    pub fn storygrid_path(&self) -> PathBuf {
        self.work_dir.join(".storygrid")
    }

    /// Run `storygrid init` and assert success.
    pub fn init(&self) {
        self.cli().arg("init").assert().success();
    }

    /// Read a state file under `.storygrid/state/` as JSON.
    pub fn read_state_json(&self, file: &str) -> serde_json::Value {
        let content = fs::read_to_string(self.storygrid_path().join("state").join(file))
            .expect("Failed to read state file");
        serde_json::from_str(&content).expect("State file is not valid JSON")
    }

    /// Point the Gemini config at `api_url` with a fixed test model.
    pub fn write_gemini_config(&self, api_url: &str) {
        let content = format!(
            "[gemini]\napi_url = \"{}\"\nmodel = \"test-model\"\ntimeout_secs = 5\n",
            api_url
        );
        fs::write(self.storygrid_path().join("config.toml"), content)
            .expect("Failed to write config.toml");
    }
}
