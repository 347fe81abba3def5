//! PerftestErrorCode trait for machine-readable error reporting.

/// Every error enum implements this to expose a stable error code string,
/// used by the CLI when it prints failures and by callers that decide
/// whether a whole configuration should be retried.
pub trait PerftestErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ARGUMENT_ERROR: &str = "ARGUMENT_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const EXECUTION_ERROR: &str = "EXECUTION_ERROR";
pub const STATS_ERROR: &str = "STATS_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
