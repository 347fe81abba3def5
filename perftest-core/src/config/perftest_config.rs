//! Top-level perftest configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CompareConfig, HistoryConfig, RunConfig, RuntimesConfig};
use crate::errors::ConfigError;
use crate::types::{Backend, Domain, Grid, Precision, RuntimeKind, TimestampSource};

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "perftest.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PERFTEST_*`)
/// 3. Project config (`perftest.toml` in project root, or an explicit file)
/// 4. User config (`~/.perftest/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PerftestConfig {
    pub run: RunConfig,
    pub compare: CompareConfig,
    pub history: HistoryConfig,
    pub runtimes: RuntimesConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub runtime: Option<RuntimeKind>,
    pub grid: Option<Grid>,
    pub precision: Option<Precision>,
    pub backend: Option<Backend>,
    pub domain: Option<Domain>,
    pub repeat: Option<usize>,
    pub parallel_jobs: Option<usize>,
    pub runtime_path: Option<std::path::PathBuf>,
    pub resamples: Option<usize>,
    pub alpha: Option<f64>,
    pub seed: Option<u64>,
    pub history_timestamp: Option<TimestampSource>,
    pub history_limit: Option<usize>,
}

impl PerftestConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_layers(&root.join(PROJECT_CONFIG_FILE), false, cli_overrides)
    }

    /// Load configuration using `path` as the project layer.
    /// Unlike the implicit project file, an explicit file must exist.
    pub fn load_file(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_layers(path, true, cli_overrides)
    }

    fn load_layers(
        project_config_path: &Path,
        required: bool,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        if required || project_config_path.exists() {
            Self::merge_toml_file(&mut config, project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PerftestConfig) -> Result<(), ConfigError> {
        let positive = |field: &str, value: Option<usize>| match value {
            Some(0) => Err(ConfigError::ValidationFailed {
                field: field.to_string(),
                message: "must be greater than 0".to_string(),
            }),
            _ => Ok(()),
        };
        positive("run.repeat", config.run.repeat)?;
        positive("run.parallel_jobs", config.run.parallel_jobs)?;
        positive("compare.resamples", config.compare.resamples)?;
        positive("history.limit", config.history.limit)?;

        if let Some(alpha) = config.compare.alpha {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "compare.alpha".to_string(),
                    message: "must be between 0.0 and 1.0 (exclusive)".to_string(),
                });
            }
        }
        if let Some(ref shell) = config.run.shell {
            if shell.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "run.shell".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.perftest/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut PerftestConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PerftestConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut PerftestConfig, other: &PerftestConfig) {
        // Run
        if other.run.runtime.is_some() {
            base.run.runtime = other.run.runtime;
        }
        if other.run.grid.is_some() {
            base.run.grid = other.run.grid;
        }
        if other.run.precision.is_some() {
            base.run.precision = other.run.precision;
        }
        if other.run.backend.is_some() {
            base.run.backend = other.run.backend;
        }
        if other.run.domain.is_some() {
            base.run.domain = other.run.domain;
        }
        if other.run.repeat.is_some() {
            base.run.repeat = other.run.repeat;
        }
        if other.run.parallel_jobs.is_some() {
            base.run.parallel_jobs = other.run.parallel_jobs;
        }
        if other.run.shell.is_some() {
            base.run.shell = other.run.shell.clone();
        }
        if other.run.command_prefix.is_some() {
            base.run.command_prefix = other.run.command_prefix.clone();
        }
        for (key, value) in &other.run.env {
            base.run.env.insert(key.clone(), value.clone());
        }

        // Compare
        if other.compare.resamples.is_some() {
            base.compare.resamples = other.compare.resamples;
        }
        if other.compare.alpha.is_some() {
            base.compare.alpha = other.compare.alpha;
        }
        if other.compare.seed.is_some() {
            base.compare.seed = other.compare.seed;
        }

        // History
        if other.history.timestamp.is_some() {
            base.history.timestamp = other.history.timestamp;
        }
        if other.history.limit.is_some() {
            base.history.limit = other.history.limit;
        }

        // Runtimes
        if other.runtimes.stella_path.is_some() {
            base.runtimes.stella_path = other.runtimes.stella_path.clone();
        }
        if other.runtimes.gridtools_path.is_some() {
            base.runtimes.gridtools_path = other.runtimes.gridtools_path.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PERFTEST_RUN_REPEAT`, `PERFTEST_COMPARE_ALPHA`, etc.
    /// Numeric variables that do not parse are ignored; an invalid domain
    /// is reported since it cannot be silently defaulted.
    fn apply_env_overrides(config: &mut PerftestConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parsed::<usize>("PERFTEST_RUN_REPEAT") {
            config.run.repeat = Some(v);
        }
        if let Some(v) = env_parsed::<usize>("PERFTEST_RUN_PARALLEL_JOBS") {
            config.run.parallel_jobs = Some(v);
        }
        if let Ok(val) = std::env::var("PERFTEST_RUN_DOMAIN") {
            let domain = val.parse::<Domain>().map_err(|e| ConfigError::InvalidValue {
                field: "PERFTEST_RUN_DOMAIN".to_string(),
                message: e.to_string(),
            })?;
            config.run.domain = Some(domain);
        }
        if let Ok(val) = std::env::var("PERFTEST_RUN_SHELL") {
            config.run.shell = Some(val);
        }
        if let Some(v) = env_parsed::<usize>("PERFTEST_COMPARE_RESAMPLES") {
            config.compare.resamples = Some(v);
        }
        if let Some(v) = env_parsed::<f64>("PERFTEST_COMPARE_ALPHA") {
            config.compare.alpha = Some(v);
        }
        if let Some(v) = env_parsed::<u64>("PERFTEST_COMPARE_SEED") {
            config.compare.seed = Some(v);
        }
        if let Some(v) = env_parsed::<usize>("PERFTEST_HISTORY_LIMIT") {
            config.history.limit = Some(v);
        }
        if let Ok(val) = std::env::var("PERFTEST_STELLA_PATH") {
            config.runtimes.stella_path = Some(val.into());
        }
        if let Ok(val) = std::env::var("PERFTEST_GRIDTOOLS_PATH") {
            config.runtimes.gridtools_path = Some(val.into());
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PerftestConfig, cli: &CliOverrides) {
        if let Some(v) = cli.runtime {
            config.run.runtime = Some(v);
        }
        if let Some(v) = cli.grid {
            config.run.grid = Some(v);
        }
        if let Some(v) = cli.precision {
            config.run.precision = Some(v);
        }
        if let Some(v) = cli.backend {
            config.run.backend = Some(v);
        }
        if let Some(v) = cli.domain {
            config.run.domain = Some(v);
        }
        if let Some(v) = cli.repeat {
            config.run.repeat = Some(v);
        }
        if let Some(v) = cli.parallel_jobs {
            config.run.parallel_jobs = Some(v);
        }
        if let Some(ref path) = cli.runtime_path {
            match config.run.effective_runtime() {
                RuntimeKind::Stella => config.runtimes.stella_path = Some(path.clone()),
                RuntimeKind::Gridtools => config.runtimes.gridtools_path = Some(path.clone()),
            }
        }
        if let Some(v) = cli.resamples {
            config.compare.resamples = Some(v);
        }
        if let Some(v) = cli.alpha {
            config.compare.alpha = Some(v);
        }
        if let Some(v) = cli.seed {
            config.compare.seed = Some(v);
        }
        if let Some(v) = cli.history_timestamp {
            config.history.timestamp = Some(v);
        }
        if let Some(v) = cli.history_limit {
            config.history.limit = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.parse().ok())
}

/// Returns the user-level perftest config directory: `~/.perftest/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".perftest"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
