//! Install locations of the stencil runtimes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::RuntimeKind;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuntimesConfig {
    /// Directory holding the STELLA standalone stencil binaries.
    pub stella_path: Option<PathBuf>,
    /// GridTools build directory; binaries are looked up relative to it.
    pub gridtools_path: Option<PathBuf>,
}

impl RuntimesConfig {
    pub fn path_for(&self, runtime: RuntimeKind) -> Option<&Path> {
        match runtime {
            RuntimeKind::Stella => self.stella_path.as_deref(),
            RuntimeKind::Gridtools => self.gridtools_path.as_deref(),
        }
    }
}
