//! Batch execution of benchmark commands.

use std::collections::BTreeMap;
use std::process::Command;

use perftest_core::config::RunConfig;
use perftest_core::errors::ExecutionError;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Runs an ordered batch of shell commands.
///
/// Implementations may run commands concurrently but must return exactly
/// one captured stdout per command, in input order; the engine groups
/// outputs by position.
pub trait BatchExecutor {
    fn execute(&self, commands: &[String]) -> Result<Vec<String>, ExecutionError>;

    /// Short description recorded in the run's environment metadata.
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

/// Executes commands on the local machine through a shell.
#[derive(Debug, Clone)]
pub struct LocalExecutor {
    shell: String,
    prefix: Option<String>,
    env: BTreeMap<String, String>,
    jobs: usize,
}

impl LocalExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            prefix: None,
            env: BTreeMap::new(),
            jobs: 1,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            shell: config.effective_shell().to_string(),
            prefix: config.command_prefix.clone(),
            env: config.env.clone(),
            jobs: config.effective_parallel_jobs(),
        }
    }

    /// Launcher placed in front of every command, e.g. `srun numactl -m 1`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Maximum number of commands running at once (at least 1).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    fn full_command(&self, command: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{prefix} {command}"),
            None => command.to_string(),
        }
    }

    /// Runs one command and captures its stdout.
    ///
    /// A non-zero exit status is logged but not an error: the partial output
    /// of a crashed binary is handed on so the time parser can report it.
    fn run_one(&self, command: &str) -> Result<String, ExecutionError> {
        let full = self.full_command(command);
        debug!(command = %full, "running");
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(&full)
            .envs(&self.env)
            .output()
            .map_err(|e| ExecutionError::Spawn {
                command: full.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            warn!(
                command = %full,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr),
                "command exited unsuccessfully"
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::from_config(&RunConfig::default())
    }
}

impl BatchExecutor for LocalExecutor {
    fn execute(&self, commands: &[String]) -> Result<Vec<String>, ExecutionError> {
        if self.jobs <= 1 {
            return commands.iter().map(|c| self.run_one(c)).collect();
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| ExecutionError::Pool(e.to_string()))?;
        // Indexed parallel iterators collect in input order.
        pool.install(|| commands.par_iter().map(|c| self.run_one(c)).collect())
    }

    fn describe(&self) -> String {
        format!("local shell={} jobs={}", self.shell, self.jobs)
    }
}
