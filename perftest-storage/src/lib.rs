//! # perftest-storage
//!
//! Benchmark results are stored one per file as pretty-printed JSON so
//! they can be diffed, archived next to job logs and reloaded for
//! comparison or history plots.

pub mod results;

pub use results::{default_file_name, list_results, load_result, load_results, save_result};
