//! Error handling for perftest.
//! One error enum per subsystem, `thiserror` only.

pub mod argument_error;
pub mod config_error;
pub mod error_code;
pub mod execution_error;
pub mod not_found_error;
pub mod parse_error;
pub mod run_error;
pub mod stats_error;
pub mod storage_error;

pub use argument_error::ArgumentError;
pub use config_error::ConfigError;
pub use error_code::PerftestErrorCode;
pub use execution_error::ExecutionError;
pub use not_found_error::NotFoundError;
pub use parse_error::ParseError;
pub use run_error::RunError;
pub use stats_error::StatsError;
pub use storage_error::StorageError;
