//! Stencil runtimes and the command-building capability.
//!
//! A runtime is the software that provides stencil binaries. The set of
//! runtimes is closed: [`Runtime`] is a tagged union over the supported
//! ones, and the engine only sees the [`CommandBuilder`] capability, so
//! tests and new runtimes can plug in without touching the engine.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use perftest_core::errors::{ArgumentError, NotFoundError, RunError};
use perftest_core::{Backend, BenchmarkConfig, Domain, Grid, Precision, RuntimeInfo, RuntimeKind};
use tracing::debug;

use crate::kernels::Kernel;

/// Turns a kernel and a domain into one shell command.
pub trait CommandBuilder {
    /// Full command running `kernel` on `domain`. Fails with
    /// [`RunError::NotFound`] when the binary is missing.
    fn build_command(&self, kernel: &Kernel, domain: Domain) -> Result<String, RunError>;

    /// Identity and build metadata of the software behind the commands.
    fn runtime_info(&self) -> RuntimeInfo;
}

/// Option sets a runtime accepts.
struct Supported {
    grids: &'static [Grid],
    precisions: &'static [Precision],
    backends: &'static [Backend],
}

const STELLA_SUPPORTED: Supported = Supported {
    grids: &[Grid::Strgrid],
    precisions: &[Precision::Float, Precision::Double],
    backends: &[Backend::Cuda, Backend::Host],
};

const GRIDTOOLS_SUPPORTED: Supported = Supported {
    grids: &[Grid::Strgrid, Grid::Icgrid],
    precisions: &[Precision::Float, Precision::Double],
    backends: &[Backend::Cuda, Backend::Host],
};

impl Supported {
    fn for_kind(kind: RuntimeKind) -> &'static Supported {
        match kind {
            RuntimeKind::Stella => &STELLA_SUPPORTED,
            RuntimeKind::Gridtools => &GRIDTOOLS_SUPPORTED,
        }
    }

    fn check(&self, grid: Grid, precision: Precision, backend: Backend) -> Result<(), ArgumentError> {
        if !self.grids.contains(&grid) {
            return Err(ArgumentError::UnsupportedGrid {
                value: grid.to_string(),
                supported: ArgumentError::supported_list(self.grids),
            });
        }
        if !self.precisions.contains(&precision) {
            return Err(ArgumentError::UnsupportedPrecision {
                value: precision.to_string(),
                supported: ArgumentError::supported_list(self.precisions),
            });
        }
        if !self.backends.contains(&backend) {
            return Err(ArgumentError::UnsupportedBackend {
                value: backend.to_string(),
                supported: ArgumentError::supported_list(self.backends),
            });
        }
        Ok(())
    }
}

/// STELLA: one standalone gtest binary per backend, kernels selected by filter.
#[derive(Debug, Clone)]
pub struct StellaRuntime {
    path: PathBuf,
    backend: Backend,
}

impl StellaRuntime {
    pub fn new(
        path: impl Into<PathBuf>,
        grid: Grid,
        precision: Precision,
        backend: Backend,
    ) -> Result<Self, ArgumentError> {
        STELLA_SUPPORTED.check(grid, precision, backend)?;
        Ok(Self {
            path: path.into(),
            backend,
        })
    }

    /// STELLA binary path; the same binary serves every kernel.
    pub fn binary_path(&self) -> Result<PathBuf, NotFoundError> {
        let suffix = match self.backend {
            Backend::Cuda => "CUDA",
            Backend::Host => "",
        };
        let binary = self.path.join(format!("StandaloneStencils{suffix}"));
        require_file(RuntimeKind::Stella, binary)
    }
}

impl CommandBuilder for StellaRuntime {
    fn build_command(&self, kernel: &Kernel, domain: Domain) -> Result<String, RunError> {
        let binary = self.binary_path()?;
        let filter = kernel
            .stella_filter
            .as_deref()
            .ok_or_else(|| ArgumentError::Unknown {
                kind: "STELLA kernel",
                value: kernel.name.clone(),
            })?;
        let (ni, nj, nk) = domain.extents();
        Ok(format!(
            "{} --ie {ni} --je {nj} --ke {nk} --gtest_filter={filter}",
            binary.display()
        ))
    }

    fn runtime_info(&self) -> RuntimeInfo {
        discover_info(RuntimeKind::Stella, &self.path)
    }
}

/// GridTools: one binary per kernel and backend under the build directory.
#[derive(Debug, Clone)]
pub struct GridtoolsRuntime {
    path: PathBuf,
    backend: Backend,
}

impl GridtoolsRuntime {
    /// Time steps passed to every GridTools binary.
    pub const TIME_STEPS: u32 = 10;

    pub fn new(
        path: impl Into<PathBuf>,
        grid: Grid,
        precision: Precision,
        backend: Backend,
    ) -> Result<Self, ArgumentError> {
        GRIDTOOLS_SUPPORTED.check(grid, precision, backend)?;
        Ok(Self {
            path: path.into(),
            backend,
        })
    }

    /// Kernel- and backend-dependent binary path.
    pub fn binary_path(&self, kernel: &Kernel) -> Result<PathBuf, NotFoundError> {
        let binary = self.path.join(kernel.gridtools_binary_for(self.backend));
        require_file(RuntimeKind::Gridtools, binary)
    }
}

impl CommandBuilder for GridtoolsRuntime {
    fn build_command(&self, kernel: &Kernel, domain: Domain) -> Result<String, RunError> {
        let binary = self.binary_path(kernel)?;
        let (ni, nj, nk) = domain.with_halo(kernel.halo)?.extents();
        Ok(format!(
            "{} {ni} {nj} {nk} {}",
            binary.display(),
            Self::TIME_STEPS
        ))
    }

    fn runtime_info(&self) -> RuntimeInfo {
        discover_info(RuntimeKind::Gridtools, &self.path)
    }
}

/// Closed set of supported runtimes.
#[derive(Debug, Clone)]
pub enum Runtime {
    Stella(StellaRuntime),
    Gridtools(GridtoolsRuntime),
}

impl Runtime {
    /// Builds the runtime for `kind`, rejecting unsupported options before
    /// anything is executed.
    pub fn new(
        kind: RuntimeKind,
        path: impl Into<PathBuf>,
        grid: Grid,
        precision: Precision,
        backend: Backend,
    ) -> Result<Self, ArgumentError> {
        Ok(match kind {
            RuntimeKind::Stella => Self::Stella(StellaRuntime::new(path, grid, precision, backend)?),
            RuntimeKind::Gridtools => {
                Self::Gridtools(GridtoolsRuntime::new(path, grid, precision, backend)?)
            }
        })
    }

    pub fn for_config(config: &BenchmarkConfig, path: impl Into<PathBuf>) -> Result<Self, ArgumentError> {
        Self::new(
            config.runtime(),
            path,
            config.grid(),
            config.precision(),
            config.backend(),
        )
    }

    /// Checks the options against what `kind` supports.
    pub fn validate(
        kind: RuntimeKind,
        grid: Grid,
        precision: Precision,
        backend: Backend,
    ) -> Result<(), ArgumentError> {
        Supported::for_kind(kind).check(grid, precision, backend)
    }

    pub fn kind(&self) -> RuntimeKind {
        match self {
            Self::Stella(_) => RuntimeKind::Stella,
            Self::Gridtools(_) => RuntimeKind::Gridtools,
        }
    }

    pub fn binary_path(&self, kernel: &Kernel) -> Result<PathBuf, NotFoundError> {
        match self {
            Self::Stella(r) => r.binary_path(),
            Self::Gridtools(r) => r.binary_path(kernel),
        }
    }
}

impl CommandBuilder for Runtime {
    fn build_command(&self, kernel: &Kernel, domain: Domain) -> Result<String, RunError> {
        match self {
            Self::Stella(r) => r.build_command(kernel, domain),
            Self::Gridtools(r) => r.build_command(kernel, domain),
        }
    }

    fn runtime_info(&self) -> RuntimeInfo {
        match self {
            Self::Stella(r) => r.runtime_info(),
            Self::Gridtools(r) => r.runtime_info(),
        }
    }
}

fn require_file(runtime: RuntimeKind, binary: PathBuf) -> Result<PathBuf, NotFoundError> {
    if binary.is_file() {
        Ok(binary)
    } else {
        Err(NotFoundError::Binary {
            runtime: runtime.to_string(),
            path: binary,
        })
    }
}

/// Version and date of the runtime at `path`, taken from the HEAD commit
/// of the enclosing git repository. Outside a repository the version is
/// `unknown` and the date absent.
pub fn discover_info(kind: RuntimeKind, path: &Path) -> RuntimeInfo {
    let (version, datetime) = match head_commit(path) {
        Ok(found) => found,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no git metadata for runtime");
            ("unknown".to_string(), None)
        }
    };
    RuntimeInfo {
        name: kind.to_string(),
        version,
        datetime,
        path: path.to_path_buf(),
    }
}

fn head_commit(path: &Path) -> Result<(String, Option<DateTime<Utc>>), git2::Error> {
    let repo = git2::Repository::discover(path)?;
    let commit = repo.head()?.peel_to_commit()?;
    let datetime = DateTime::from_timestamp(commit.time().seconds(), 0);
    Ok((commit.id().to_string(), datetime))
}
