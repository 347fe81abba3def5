//! Pairs the sample series of two sets of runs and compares each pair.

use std::collections::BTreeMap;

use perftest_core::errors::StatsError;
use perftest_core::{RunResult, SeriesKey};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::bootstrap::{bootstrap_median_difference, BootstrapSettings, ConfidenceInterval};
use crate::classify::Classification;
use crate::stats::median;

/// Comparison of one kernel/backend/precision series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KernelComparison {
    pub key: SeriesKey,
    pub interval: ConfidenceInterval,
    pub classification: Classification,
    pub before_median: f64,
    pub after_median: f64,
}

impl KernelComparison {
    /// Ratio `before / after` of the medians; above 1 is faster.
    pub fn speedup(&self) -> f64 {
        self.before_median / self.after_median
    }
}

/// Compares every series of `after` against the series of `before` with
/// the same key.
///
/// The result follows the order of `after`. Keys without a counterpart
/// and results stored without raw samples are skipped; if the same key
/// appears in several `before` runs the first one with samples is used.
pub fn compare_runs<R: Rng + ?Sized>(
    before: &[RunResult],
    after: &[RunResult],
    settings: &BootstrapSettings,
    rng: &mut R,
) -> Result<Vec<KernelComparison>, StatsError> {
    let mut baseline: BTreeMap<SeriesKey, &[f64]> = BTreeMap::new();
    for (key, samples) in before.iter().flat_map(RunResult::series) {
        if samples.is_empty() {
            warn!(%key, "baseline result carries no raw samples, skipping");
            continue;
        }
        baseline.entry(key).or_insert(samples);
    }

    let mut comparisons = Vec::new();
    for (key, samples) in after.iter().flat_map(RunResult::series) {
        let Some(reference) = baseline.get(&key) else {
            debug!(%key, "no matching series in the baseline");
            continue;
        };
        if samples.is_empty() {
            warn!(%key, "result carries no raw samples, skipping");
            continue;
        }
        let interval = bootstrap_median_difference(reference, samples, settings, rng)?;
        let classification = interval.classify();
        debug!(%key, %classification, "compared series");
        comparisons.push(KernelComparison {
            key,
            interval,
            classification,
            before_median: median(reference),
            after_median: median(samples),
        });
    }
    Ok(comparisons)
}
