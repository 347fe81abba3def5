//! Built-in kernel sets.
//!
//! A kernel is one named stencil benchmark. Each kernel knows how both
//! runtimes locate it: STELLA selects it with a gtest filter inside one
//! standalone binary, GridTools ships one binary per kernel and backend.

use perftest_core::{Backend, Grid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    pub name: String,
    /// gtest filter selecting this kernel in the STELLA standalone binary.
    pub stella_filter: Option<String>,
    /// Binary path stem relative to the GridTools build directory; the
    /// backend is appended as `_<backend>`.
    pub gridtools_binary: String,
    /// Halo width added on each side of every axis for GridTools runs.
    pub halo: u32,
}

impl Kernel {
    pub fn new(name: &str, gridtools_binary: &str, halo: u32) -> Self {
        Self {
            name: name.to_string(),
            stella_filter: None,
            gridtools_binary: gridtools_binary.to_string(),
            halo,
        }
    }

    pub fn with_stella_filter(mut self, filter: &str) -> Self {
        self.stella_filter = Some(filter.to_string());
        self
    }

    /// GridTools binary name for `backend`, relative to the build directory.
    pub fn gridtools_binary_for(&self, backend: Backend) -> String {
        format!("{}_{}", self.gridtools_binary, backend)
    }
}

/// Ordered collection of kernels benchmarked together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelSet {
    id: String,
    kernels: Vec<Kernel>,
}

impl KernelSet {
    pub fn new(id: impl Into<String>, kernels: Vec<Kernel>) -> Self {
        Self {
            id: id.into(),
            kernels,
        }
    }

    /// The standard kernels for a grid type.
    pub fn builtin(grid: Grid) -> Self {
        let kernels = match grid {
            Grid::Strgrid => vec![
                Kernel::new("copy_stencil", "regression/copy_stencil", 0)
                    .with_stella_filter("CopyStencil.*"),
                Kernel::new("horizontal_diffusion", "regression/horizontal_diffusion", 2)
                    .with_stella_filter("HorizontalDiffusion.*"),
                Kernel::new("simple_hori_diff", "regression/simple_hori_diff", 2)
                    .with_stella_filter("SimpleHoriDiff.*"),
                Kernel::new("vertical_advection", "regression/vertical_advection_dycore", 3)
                    .with_stella_filter("VerticalAdvection.*"),
                Kernel::new("advection_pdbott_prepare_tracers", "regression/advection_pdbott_prepare_tracers", 0)
                    .with_stella_filter("AdvectionPDBottPrepareTracers.*"),
            ],
            Grid::Icgrid => vec![
                Kernel::new("copy_stencil", "regression/icosahedral/copy_stencil", 0),
                Kernel::new("laplace", "regression/icosahedral/laplace", 1),
                Kernel::new("divergence", "regression/icosahedral/div", 1),
                Kernel::new("curl", "regression/icosahedral/curl", 1),
                Kernel::new("stencil_on_edges", "regression/icosahedral/stencil_on_edges", 1),
            ],
        };
        Self::new(grid.as_str(), kernels)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kernels(&self) -> &[Kernel] {
        &self.kernels
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Kernel> {
        self.kernels.iter()
    }
}

impl<'a> IntoIterator for &'a KernelSet {
    type Item = &'a Kernel;
    type IntoIter = std::slice::Iter<'a, Kernel>;

    fn into_iter(self) -> Self::IntoIter {
        self.kernels.iter()
    }
}
