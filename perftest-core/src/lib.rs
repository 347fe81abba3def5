//! # perftest-core
//!
//! Shared foundation of the stencil performance test suite: the benchmark
//! data model, per-subsystem error types, layered TOML configuration and
//! tracing setup.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use types::{
    Backend, BenchmarkConfig, Domain, EnvironmentInfo, Grid, KernelResult, Precision, RunResult,
    RuntimeInfo, RuntimeKind, SeriesKey, TimestampSource,
};
