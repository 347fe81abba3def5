use std::io::Write;

use anyhow::{anyhow, Result};
use perftest_core::config::PerftestConfig;
use perftest_core::BenchmarkConfig;
use perftest_engine::{KernelSet, LocalExecutor, Runtime};
use perftest_storage::{default_file_name, save_result};
use tracing::info;

use super::coded;
use crate::cli::RunArgs;
use crate::report;

pub fn execute(args: &RunArgs, config: &PerftestConfig, out: &mut dyn Write) -> Result<()> {
    let run = &config.run;
    let benchmark = BenchmarkConfig::new(
        run.effective_runtime(),
        run.effective_grid(),
        run.effective_precision(),
        run.effective_backend(),
        run.effective_domain(),
        run.effective_repeat(),
    )
    .map_err(coded)?;

    let path = config.runtimes.path_for(benchmark.runtime()).ok_or_else(|| {
        anyhow!(
            "no build directory for runtime {0}: pass --path or set runtimes.{0}_path",
            benchmark.runtime()
        )
    })?;
    let runtime = Runtime::for_config(&benchmark, path).map_err(coded)?;
    let kernels = KernelSet::builtin(benchmark.grid());
    let executor = LocalExecutor::from_config(run);
    info!(kernel_set = kernels.id(), kernels = kernels.len(), "starting benchmark");

    let result = perftest_engine::run(&benchmark, &kernels, &runtime, &executor).map_err(coded)?;

    let target = if args.output.is_dir() {
        args.output.join(default_file_name(&result))
    } else {
        args.output.clone()
    };
    save_result(&target, &result).map_err(coded)?;

    report::write_run(out, &result)?;
    writeln!(out, "Saved {}", target.display())?;
    Ok(())
}
