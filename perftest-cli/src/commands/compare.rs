use std::io::Write;

use anyhow::Result;
use perftest_analysis::{compare_runs, BootstrapSettings, KernelComparison};
use perftest_core::config::PerftestConfig;
use perftest_storage::load_results;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use super::coded;
use crate::cli::CompareArgs;
use crate::report;

pub fn execute(args: &CompareArgs, config: &PerftestConfig, out: &mut dyn Write) -> Result<()> {
    let before = load_results(&[&args.before]).map_err(coded)?;
    let after = load_results(&[&args.after]).map_err(coded)?;

    let settings = BootstrapSettings::from(&config.compare);
    let mut rng = match config.compare.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let comparisons = compare_runs(&before, &after, &settings, &mut rng).map_err(coded)?;
    if comparisons.is_empty() {
        warn!("no series in common between the two result sets");
    }

    let shown: Vec<&KernelComparison> = comparisons
        .iter()
        .filter(|c| !args.significant || c.classification.is_significant())
        .collect();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &shown)?;
        writeln!(out)?;
    } else {
        report::write_comparison(out, &shown)?;
    }
    Ok(())
}
