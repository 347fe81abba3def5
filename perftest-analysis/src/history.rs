//! Per-configuration performance over a sequence of runs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use perftest_core::{KernelResult, RunResult, SeriesKey, TimestampSource};
use serde::Serialize;
use tracing::warn;

use crate::stats::quantiles;

/// 5th, 50th and 95th percentile of one sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentiles {
    pub lower: f64,
    pub median: f64,
    pub upper: f64,
}

impl Percentiles {
    pub const LEVELS: [f64; 3] = [0.05, 0.5, 0.95];

    /// All NaN; marks a run in which the configuration did not appear.
    pub fn missing() -> Self {
        Self {
            lower: f64::NAN,
            median: f64::NAN,
            upper: f64::NAN,
        }
    }

    pub fn of(samples: &[f64]) -> Self {
        match quantiles(samples, &Self::LEVELS)[..] {
            [lower, median, upper] => Self { lower, median, upper },
            _ => Self::missing(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.median.is_nan()
    }
}

/// Percentile bands of one configuration, index-aligned with
/// [`History::timestamps`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PercentileSeries {
    pub lower: Vec<f64>,
    pub median: Vec<f64>,
    pub upper: Vec<f64>,
}

impl PercentileSeries {
    fn push(&mut self, p: Percentiles) {
        self.lower.push(p.lower);
        self.median.push(p.median);
        self.upper.push(p.upper);
    }

    pub fn len(&self) -> usize {
        self.median.len()
    }

    pub fn is_empty(&self) -> bool {
        self.median.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Percentiles> {
        Some(Percentiles {
            lower: *self.lower.get(index)?,
            median: *self.median.get(index)?,
            upper: *self.upper.get(index)?,
        })
    }
}

/// One configuration at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint<K> {
    pub timestamp: DateTime<Utc>,
    pub key: K,
    #[serde(flatten)]
    pub percentiles: Percentiles,
}

/// Time-ordered percentile series for every configuration key.
#[derive(Debug, Clone, PartialEq)]
pub struct History<K: Ord> {
    pub timestamps: Vec<DateTime<Utc>>,
    pub series: BTreeMap<K, PercentileSeries>,
}

impl<K: Ord + Clone> History<K> {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn series(&self, key: &K) -> Option<&PercentileSeries> {
        self.series.get(key)
    }

    /// Flattened view, grouped by key and ordered by time within a key.
    pub fn points(&self) -> Vec<HistoryPoint<K>> {
        self.series
            .iter()
            .flat_map(|(key, series)| {
                self.timestamps.iter().enumerate().filter_map(move |(i, timestamp)| {
                    Some(HistoryPoint {
                        timestamp: *timestamp,
                        key: key.clone(),
                        percentiles: series.get(i)?,
                    })
                })
            })
            .collect()
    }
}

/// Builds the history of `runs` keyed by `key_of`.
///
/// Runs are stably ordered by the chosen timestamp; runs without one
/// (a runtime without commit date) are dropped with a warning. With a
/// `limit` only the most recent runs are kept. Every key seen in the kept
/// runs gets one entry per run, NaN where the run lacks it. Kernels of one
/// run that map to the same key have their samples pooled.
pub fn history_by<K, F>(
    runs: &[RunResult],
    source: TimestampSource,
    limit: Option<usize>,
    key_of: F,
) -> History<K>
where
    K: Ord + Clone,
    F: Fn(&RunResult, &KernelResult) -> K,
{
    let mut dated: Vec<(DateTime<Utc>, &RunResult)> = runs
        .iter()
        .filter_map(|run| match run.timestamp(source) {
            Some(timestamp) => Some((timestamp, run)),
            None => {
                warn!(
                    runtime = %run.runtime.name,
                    version = %run.runtime.version,
                    %source,
                    "run has no timestamp, skipping"
                );
                None
            }
        })
        .collect();
    dated.sort_by_key(|(timestamp, _)| *timestamp);

    if dated.windows(2).any(|w| w[0].0 == w[1].0) {
        warn!("runs with identical timestamps found, history order is ambiguous");
    }
    if let Some(limit) = limit {
        let skip = dated.len().saturating_sub(limit);
        dated.drain(..skip);
    }

    let per_run: Vec<BTreeMap<K, Vec<f64>>> = dated
        .iter()
        .map(|(_, run)| {
            let mut samples: BTreeMap<K, Vec<f64>> = BTreeMap::new();
            for kernel in &run.kernels {
                samples
                    .entry(key_of(run, kernel))
                    .or_default()
                    .extend_from_slice(&kernel.samples);
            }
            samples
        })
        .collect();

    let mut series: BTreeMap<K, PercentileSeries> = BTreeMap::new();
    for key in per_run.iter().flat_map(BTreeMap::keys) {
        if series.contains_key(key) {
            continue;
        }
        let mut entry = PercentileSeries::default();
        for run in &per_run {
            entry.push(run.get(key).map_or_else(Percentiles::missing, |s| Percentiles::of(s.as_slice())));
        }
        series.insert(key.clone(), entry);
    }

    History {
        timestamps: dated.iter().map(|(timestamp, _)| *timestamp).collect(),
        series,
    }
}

/// History keyed by kernel, backend and precision.
pub fn history(
    runs: &[RunResult],
    source: TimestampSource,
    limit: Option<usize>,
) -> History<SeriesKey> {
    history_by(runs, source, limit, RunResult::series_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentiles_of_known_samples() {
        let samples: Vec<f64> = (0..=100).map(f64::from).collect();
        let p = Percentiles::of(&samples);
        assert!((p.lower - 5.0).abs() < 1e-9);
        assert!((p.median - 50.0).abs() < 1e-9);
        assert!((p.upper - 95.0).abs() < 1e-9);
        assert!(!p.is_missing());
    }

    #[test]
    fn missing_is_all_nan() {
        let p = Percentiles::missing();
        assert!(p.lower.is_nan() && p.median.is_nan() && p.upper.is_nan());
        assert!(Percentiles::of(&[]).is_missing());
    }

    #[test]
    fn series_get_is_aligned() {
        let mut series = PercentileSeries::default();
        series.push(Percentiles { lower: 1.0, median: 2.0, upper: 3.0 });
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(0).map(|p| p.median), Some(2.0));
        assert!(series.get(1).is_none());
    }
}
