//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use perftest_core::config::CliOverrides;
use perftest_core::{Backend, Domain, Grid, Precision, RuntimeKind, TimestampSource};

/// Stencil performance tests
#[derive(Parser, Debug)]
#[command(name = "perftest")]
#[command(about = "Run stencil benchmarks, compare results and track them over time")]
#[command(version)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug); PERFTEST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file used instead of ./perftest.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run all kernels of a runtime and store the result as JSON
    Run(RunArgs),
    /// Compare two sets of results
    Compare(CompareArgs),
    /// Summarize many results over time
    History(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Runtime to benchmark: stella or gridtools
    #[arg(long)]
    pub runtime: Option<RuntimeKind>,

    /// Grid type: strgrid or icgrid
    #[arg(short, long)]
    pub grid: Option<Grid>,

    /// Floating point precision: float or double
    #[arg(short, long)]
    pub precision: Option<Precision>,

    /// Backend: cuda or host
    #[arg(short, long)]
    pub backend: Option<Backend>,

    /// Domain size, e.g. 128x128x80
    #[arg(short, long)]
    pub domain: Option<Domain>,

    /// Number of runs per kernel
    #[arg(short = 'r', long = "runs")]
    pub repeat: Option<usize>,

    /// Number of commands running at once
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Build directory of the runtime
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Result file; for an existing directory a file name is generated
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Baseline result file or directory
    pub before: PathBuf,

    /// Result file or directory to compare against the baseline
    pub after: PathBuf,

    /// Bootstrap resamples
    #[arg(long)]
    pub resamples: Option<usize>,

    /// Significance level of the confidence interval
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Seed for reproducible resampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only list series whose tag is not "="
    #[arg(long)]
    pub significant: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Result files or directories of results
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Order runs by job time or by runtime commit time
    #[arg(short, long)]
    pub timestamp: Option<TimestampSource>,

    /// Keep only the most recent runs
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Command {
    /// Configuration overrides given on the command line.
    pub fn overrides(&self) -> CliOverrides {
        match self {
            Command::Run(args) => CliOverrides {
                runtime: args.runtime,
                grid: args.grid,
                precision: args.precision,
                backend: args.backend,
                domain: args.domain,
                repeat: args.repeat,
                parallel_jobs: args.jobs,
                runtime_path: args.path.clone(),
                ..Default::default()
            },
            Command::Compare(args) => CliOverrides {
                resamples: args.resamples,
                alpha: args.alpha,
                seed: args.seed,
                ..Default::default()
            },
            Command::History(args) => CliOverrides {
                history_timestamp: args.timestamp,
                history_limit: args.limit,
                ..Default::default()
            },
        }
    }
}
