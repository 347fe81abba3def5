//! Shared data model: benchmark identity, run options, and results.

pub mod benchmark;
pub mod options;
pub mod result;

pub use benchmark::{BenchmarkConfig, Domain};
pub use options::{Backend, Grid, Precision, RuntimeKind, TimestampSource};
pub use result::{EnvironmentInfo, KernelResult, RunResult, RuntimeInfo, SeriesKey};
