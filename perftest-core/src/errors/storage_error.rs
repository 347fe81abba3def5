//! Result persistence errors.

use std::path::PathBuf;

use super::error_code::{self, PerftestErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Malformed result file {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Failed to serialize result for {}: {message}", path.display())]
    Serialize { path: PathBuf, message: String },
}

impl PerftestErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
