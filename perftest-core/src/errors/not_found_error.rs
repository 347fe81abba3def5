//! Missing binaries and runtime directories.

use std::path::PathBuf;

use super::error_code::{self, PerftestErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum NotFoundError {
    #[error("Could not find {runtime} binary at {}", path.display())]
    Binary { runtime: String, path: PathBuf },

    #[error("Runtime path for {runtime} does not exist: {}", path.display())]
    RuntimePath { runtime: String, path: PathBuf },
}

impl PerftestErrorCode for NotFoundError {
    fn error_code(&self) -> &'static str {
        error_code::NOT_FOUND
    }
}
