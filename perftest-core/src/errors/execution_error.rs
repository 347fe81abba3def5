//! Batch execution errors.

use super::error_code::{self, PerftestErrorCode};

/// Failure of the batch executor. Any of these fails the whole batch.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Failed to spawn `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("Executor returned {actual} outputs for {expected} commands")]
    OutputCount { expected: usize, actual: usize },

    #[error("Failed to build worker pool: {0}")]
    Pool(String),
}

impl PerftestErrorCode for ExecutionError {
    fn error_code(&self) -> &'static str {
        error_code::EXECUTION_ERROR
    }
}
