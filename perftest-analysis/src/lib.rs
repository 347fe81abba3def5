//! # perftest-analysis
//!
//! Decides whether performance changed between two benchmark runs and
//! summarizes performance over many runs.
//!
//! - [`bootstrap`]: percentile-bootstrap confidence interval for the
//!   relative difference of medians
//! - [`classify`]: maps an interval to a discrete change tag
//! - [`comparison`]: pairs the series of two sets of runs and compares them
//! - [`history`]: 5/50/95 percentile bands per configuration over time

pub mod bootstrap;
pub mod classify;
pub mod comparison;
pub mod history;
pub mod stats;

pub use bootstrap::{bootstrap_median_difference, compare, BootstrapSettings, ConfidenceInterval};
pub use classify::{Classification, Direction};
pub use comparison::{compare_runs, KernelComparison};
pub use history::{history, history_by, History, HistoryPoint, PercentileSeries, Percentiles};
