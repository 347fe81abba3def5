//! Argument errors: values outside what a runtime supports.

use super::error_code::{self, PerftestErrorCode};

/// Raised eagerly when a runtime is constructed with a grid, precision or
/// backend it does not support, or with an unusable domain.
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    #[error("Invalid grid \"{value}\", supported are {supported}")]
    UnsupportedGrid { value: String, supported: String },

    #[error("Invalid precision \"{value}\", supported are {supported}")]
    UnsupportedPrecision { value: String, supported: String },

    #[error("Invalid backend \"{value}\", supported are {supported}")]
    UnsupportedBackend { value: String, supported: String },

    #[error("Unknown {kind} \"{value}\"")]
    Unknown { kind: &'static str, value: String },

    #[error("Invalid domain {value}: {message}")]
    InvalidDomain { value: String, message: String },

    #[error("Repeat count must be at least 1, got {value}")]
    InvalidRepeat { value: usize },
}

impl ArgumentError {
    /// Formats a supported-values list the way the messages show it:
    /// `"a", "b"`.
    pub fn supported_list<T: std::fmt::Display>(values: &[T]) -> String {
        values
            .iter()
            .map(|v| format!("\"{v}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl PerftestErrorCode for ArgumentError {
    fn error_code(&self) -> &'static str {
        error_code::ARGUMENT_ERROR
    }
}
