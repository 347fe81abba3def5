//! Configuration system for perftest.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod compare_config;
pub mod history_config;
pub mod perftest_config;
pub mod run_config;
pub mod runtimes_config;

pub use compare_config::CompareConfig;
pub use history_config::HistoryConfig;
pub use perftest_config::{CliOverrides, PerftestConfig};
pub use run_config::RunConfig;
pub use runtimes_config::RuntimesConfig;
