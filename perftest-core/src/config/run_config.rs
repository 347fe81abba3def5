//! Benchmark execution configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Backend, Domain, Grid, Precision, RuntimeKind};

/// Configuration for running benchmarks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    /// Runtime providing the stencils. Default: gridtools.
    pub runtime: Option<RuntimeKind>,
    /// Grid type. Default: strgrid.
    pub grid: Option<Grid>,
    /// Precision. Default: double.
    pub precision: Option<Precision>,
    /// Backend. Default: host.
    pub backend: Option<Backend>,
    /// Domain size as `[ni, nj, nk]`. Default: 128x128x80.
    pub domain: Option<Domain>,
    /// Runs per kernel. Default: 10.
    pub repeat: Option<usize>,
    /// Commands executed concurrently by the local executor. Default: 1.
    pub parallel_jobs: Option<usize>,
    /// Shell used to run commands. Default: /bin/sh.
    pub shell: Option<String>,
    /// Launcher prepended to every command, e.g. `srun numactl -m 1`.
    pub command_prefix: Option<String>,
    /// Extra environment variables for every command.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

pub const DEFAULT_REPEAT: usize = 10;
pub const DEFAULT_PARALLEL_JOBS: usize = 1;
pub const DEFAULT_SHELL: &str = "/bin/sh";

impl RunConfig {
    pub fn effective_runtime(&self) -> RuntimeKind {
        self.runtime.unwrap_or(RuntimeKind::Gridtools)
    }

    pub fn effective_grid(&self) -> Grid {
        self.grid.unwrap_or(Grid::Strgrid)
    }

    pub fn effective_precision(&self) -> Precision {
        self.precision.unwrap_or(Precision::Double)
    }

    pub fn effective_backend(&self) -> Backend {
        self.backend.unwrap_or(Backend::Host)
    }

    /// Returns the effective domain, defaulting to 128x128x80.
    pub fn effective_domain(&self) -> Domain {
        self.domain.unwrap_or_default()
    }

    /// Returns the effective repeat count, defaulting to 10.
    pub fn effective_repeat(&self) -> usize {
        self.repeat.unwrap_or(DEFAULT_REPEAT)
    }

    pub fn effective_parallel_jobs(&self) -> usize {
        self.parallel_jobs.unwrap_or(DEFAULT_PARALLEL_JOBS)
    }

    pub fn effective_shell(&self) -> &str {
        self.shell.as_deref().unwrap_or(DEFAULT_SHELL)
    }
}
