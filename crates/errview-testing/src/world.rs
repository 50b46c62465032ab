//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated workspaces
//! - Placing sample error sources
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::write_source;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use errview_testing::TestWorld;
/// use errview_testing::fixtures::WORKED_EXAMPLE;
///
/// let world = TestWorld::new().with_source("all_errors.json", WORKED_EXAMPLE);
///
/// let result = world.run(&["workflows"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    sources_dir: PathBuf,
    sources: Vec<PathBuf>,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let data_dir = base_path.join(".errview");
        let sources_dir = base_path.join("sources");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        std::fs::create_dir_all(&sources_dir).expect("Failed to create sources dir");

        Self {
            temp_dir,
            data_dir,
            sources_dir,
            sources: Vec::new(),
            env_vars: HashMap::new(),
        }
    }

    /// Get the workspace directory (.errview).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the directory sample sources are written to.
    pub fn sources_dir(&self) -> &Path {
        &self.sources_dir
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a source document and pass it to every command via `--source`.
    pub fn with_source(mut self, name: &str, body: &str) -> Self {
        let path = write_source(&self.sources_dir, name, body).expect("Failed to write source");
        self.sources.push(path);
        self
    }

    /// Write a document that is not passed as a source (explanations,
    /// readiness, sources for `ingest`). Returns its path.
    pub fn write_file(&self, name: &str, body: &str) -> PathBuf {
        write_source(&self.sources_dir, name, body).expect("Failed to write file")
    }

    /// Write the workspace `config.toml`.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.data_dir.join("config.toml"), toml).expect("Failed to write config");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Path of a sample source written by `with_source` or `write_file`.
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.sources_dir.join(name)
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// Adds `--data-dir`, one `--source` per registered source, the working
    /// directory and environment variables. Output format is left to the
    /// caller.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir").arg(self.data_dir());

        for source in &self.sources {
            cmd.arg("--source").arg(source);
        }

        cmd.current_dir(self.temp_dir.path());

        // Keep RUST_LOG from the outer test run out of stderr assertions.
        cmd.env_remove("RUST_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built and the `CARGO_BIN_EXE_` environment variable to be set (which
    /// cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("errview")?;
        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Execute a command with `--format json` and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> Result<serde_json::Value> {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        let result = self.run(&full)?;
        if !result.success() {
            anyhow::bail!("errview {:?} failed: {}", args, result.stderr);
        }
        result.json()
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
