//! Subcommand implementations. Each writes its report to `out`.

pub mod compare;
pub mod history;
pub mod run;

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use perftest_core::config::PerftestConfig;
use perftest_core::errors::PerftestErrorCode;

use crate::cli::{Cli, Command};

/// Resolves the layered configuration with this invocation's flags on top.
pub fn load_config(cli: &Cli) -> Result<PerftestConfig> {
    let overrides = cli.command.overrides();
    let config = match cli.config {
        Some(ref path) => PerftestConfig::load_file(path, Some(&overrides)),
        None => {
            let root = std::env::current_dir().context("cannot determine working directory")?;
            PerftestConfig::load(&root, Some(&overrides))
        }
    };
    config.map_err(coded)
}

pub fn execute(command: &Command, config: &PerftestConfig, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Run(args) => run::execute(args, config, out),
        Command::Compare(args) => compare::execute(args, config, out),
        Command::History(args) => history::execute(args, config, out),
    }
}

/// Turns a library error into an `anyhow` error tagged with its code.
pub(crate) fn coded<E: PerftestErrorCode + Display>(error: E) -> anyhow::Error {
    anyhow::anyhow!(error.coded_string())
}
