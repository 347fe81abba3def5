//! Benchmark run errors.

use super::{ArgumentError, ConfigError, ExecutionError, NotFoundError, ParseError};
use super::error_code::PerftestErrorCode;

/// Errors that can abort a benchmark invocation.
/// Aggregates subsystem errors via `From` conversions. None of them is
/// retried; retrying a configuration is the caller's decision.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Argument error: {0}")]
    Argument(#[from] ArgumentError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

impl PerftestErrorCode for RunError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Argument(e) => e.error_code(),
            Self::NotFound(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Execution(e) => e.error_code(),
        }
    }
}
