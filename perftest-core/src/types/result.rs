//! Benchmark results: the durable artifact of a run.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::benchmark::BenchmarkConfig;
use super::options::{Backend, Precision, TimestampSource};

/// Timing summary of one kernel for one benchmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelResult {
    pub kernel: String,
    /// Mean run time in seconds.
    pub mean: f64,
    /// Sample standard deviation in seconds, exactly 0 for a single sample.
    pub stdev: f64,
    /// Raw per-repeat times, kept for later recomparison.
    #[serde(default)]
    pub samples: Vec<f64>,
}

/// Identity and build metadata of the runtime that produced a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    pub name: String,
    /// Version number or commit hash.
    pub version: String,
    /// Build or commit date, when known.
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// Where and when a benchmark job ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub hostname: String,
    pub datetime: DateTime<Utc>,
    #[serde(default)]
    pub executor: String,
}

/// Output of one benchmark invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub config: BenchmarkConfig,
    /// One entry per kernel, in kernel-set order.
    pub kernels: Vec<KernelResult>,
    pub runtime: RuntimeInfo,
    pub environment: EnvironmentInfo,
}

impl RunResult {
    pub fn kernel(&self, name: &str) -> Option<&KernelResult> {
        self.kernels.iter().find(|k| k.kernel == name)
    }

    /// The timestamp a history orders this run by, if present.
    pub fn timestamp(&self, source: TimestampSource) -> Option<DateTime<Utc>> {
        match source {
            TimestampSource::Job => Some(self.environment.datetime),
            TimestampSource::Commit => self.runtime.datetime,
        }
    }

    /// Comparison key of one of this run's kernels.
    pub fn series_key(&self, kernel: &KernelResult) -> SeriesKey {
        SeriesKey {
            kernel: kernel.kernel.clone(),
            backend: self.config.backend(),
            precision: self.config.precision(),
        }
    }

    /// Raw sample series keyed by kernel, backend and precision.
    pub fn series(&self) -> impl Iterator<Item = (SeriesKey, &[f64])> + '_ {
        self.kernels
            .iter()
            .map(move |k| (self.series_key(k), k.samples.as_slice()))
    }
}

/// Configuration key under which sample series are matched across runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub kernel: String,
    pub backend: Backend,
    pub precision: Precision,
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.kernel, self.backend, self.precision)
    }
}
