//! # perftest-cli
//!
//! Argument parsing and subcommand implementations of the `perftest`
//! binary. Kept in a library so the commands can be driven from tests.

pub mod cli;
pub mod commands;
pub mod report;

pub use cli::{Cli, Command};
