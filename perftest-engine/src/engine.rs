//! Execution engine: replicate, execute, parse, group, reduce.

use chrono::Utc;
use perftest_core::errors::{ExecutionError, RunError};
use perftest_core::{BenchmarkConfig, EnvironmentInfo, KernelResult, RunResult};
use statrs::statistics::Statistics;
use tracing::{debug, info};

use crate::executor::BatchExecutor;
use crate::kernels::KernelSet;
use crate::parser::parse_time;
use crate::runtime::CommandBuilder;

/// Mean and standard deviation of one kernel's samples, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub mean: f64,
    pub stdev: f64,
}

/// Replicates every command `repeat` times, keeping the copies of one
/// command contiguous: `[a, b]` with `repeat = 2` gives `[a, a, b, b]`.
pub fn expand_commands(commands: &[String], repeat: usize) -> Vec<String> {
    commands
        .iter()
        .flat_map(|command| std::iter::repeat(command.clone()).take(repeat))
        .collect()
}

/// Splits the flat sample sequence into contiguous groups of `repeat`.
pub fn group_samples(samples: &[f64], repeat: usize) -> Vec<&[f64]> {
    samples.chunks(repeat.max(1)).collect()
}

/// Mean and Bessel-corrected sample standard deviation. The deviation of
/// fewer than two samples is exactly 0.
pub fn reduce_samples(samples: &[f64]) -> SampleSummary {
    let mean = samples.mean();
    let stdev = if samples.len() > 1 { samples.std_dev() } else { 0.0 };
    SampleSummary { mean, stdev }
}

/// Runs every kernel of `kernels` `config.repeat()` times and summarizes
/// the measured times.
///
/// Any failure aborts the whole run: a missing binary, an executor error,
/// or a single output without a parsable time. No partial result is
/// produced and nothing is retried.
pub fn run<B, E>(
    config: &BenchmarkConfig,
    kernels: &KernelSet,
    builder: &B,
    executor: &E,
) -> Result<RunResult, RunError>
where
    B: CommandBuilder + ?Sized,
    E: BatchExecutor + ?Sized,
{
    let repeat = config.repeat();
    let commands = kernels
        .iter()
        .map(|kernel| builder.build_command(kernel, config.domain()))
        .collect::<Result<Vec<_>, _>>()?;
    for command in &commands {
        debug!(%command, "built command");
    }

    let all_commands = expand_commands(&commands, repeat);
    info!(%config, commands = all_commands.len(), "running stencils");
    let outputs = executor.execute(&all_commands)?;
    info!("running stencils finished");

    if outputs.len() != all_commands.len() {
        return Err(ExecutionError::OutputCount {
            expected: all_commands.len(),
            actual: outputs.len(),
        }
        .into());
    }

    let samples = outputs
        .iter()
        .map(|output| parse_time(output))
        .collect::<Result<Vec<_>, _>>()?;

    let results = kernels
        .iter()
        .zip(group_samples(&samples, repeat))
        .map(|(kernel, group)| {
            let summary = reduce_samples(group);
            debug!(
                kernel = %kernel.name,
                mean = summary.mean,
                stdev = summary.stdev,
                "reduced samples"
            );
            KernelResult {
                kernel: kernel.name.clone(),
                mean: summary.mean,
                stdev: summary.stdev,
                samples: group.to_vec(),
            }
        })
        .collect();

    Ok(RunResult {
        config: config.clone(),
        kernels: results,
        runtime: builder.runtime_info(),
        environment: EnvironmentInfo {
            hostname: hostname(),
            datetime: Utc::now(),
            executor: executor.describe(),
        },
    })
}

fn hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.is_empty())
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
