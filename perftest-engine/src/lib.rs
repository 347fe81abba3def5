//! # perftest-engine
//!
//! Runs stencil benchmarks and reduces their timings.
//!
//! - [`kernels`]: built-in kernel sets per grid
//! - [`runtime`]: STELLA and GridTools command construction
//! - [`executor`]: order-preserving batch execution of shell commands
//! - [`parser`]: extraction of the reported run time from program output
//! - [`engine`]: replication, grouping, and mean/stdev reduction

pub mod engine;
pub mod executor;
pub mod kernels;
pub mod parser;
pub mod runtime;

pub use engine::{expand_commands, group_samples, reduce_samples, run, SampleSummary};
pub use executor::{BatchExecutor, LocalExecutor};
pub use kernels::{Kernel, KernelSet};
pub use parser::parse_time;
pub use runtime::{CommandBuilder, GridtoolsRuntime, Runtime, StellaRuntime};
