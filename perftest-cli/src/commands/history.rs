use std::io::Write;

use anyhow::Result;
use perftest_core::config::PerftestConfig;
use perftest_storage::load_results;

use super::coded;
use crate::cli::HistoryArgs;
use crate::report;

pub fn execute(args: &HistoryArgs, config: &PerftestConfig, out: &mut dyn Write) -> Result<()> {
    let runs = load_results(&args.paths).map_err(coded)?;
    let history = perftest_analysis::history(
        &runs,
        config.history.effective_timestamp(),
        config.history.limit,
    );

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &history.points())?;
        writeln!(out)?;
    } else {
        report::write_history(out, &history)?;
    }
    Ok(())
}
