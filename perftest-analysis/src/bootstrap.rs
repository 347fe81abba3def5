//! Percentile bootstrap of the difference of medians.
//!
//! Both sample sets are divided by the median of `before`, so the interval
//! is a relative change: `-0.1` means the median got about 10% smaller
//! (faster), `+0.1` about 10% larger (slower).

use perftest_core::config::CompareConfig;
use perftest_core::errors::StatsError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::Classification;
use crate::stats::{median, median_in_place, quantile_sorted};

/// Closed interval `[lower, upper]` with `lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct ConfidenceInterval {
    lower: f64,
    upper: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64) -> Result<Self, StatsError> {
        // Also rejects NaN bounds.
        if lower <= upper {
            Ok(Self { lower, upper })
        } else {
            Err(StatsError::InvalidInterval { lower, upper })
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn classify(&self) -> Classification {
        Classification::from_interval(self)
    }
}

impl TryFrom<[f64; 2]> for ConfidenceInterval {
    type Error = StatsError;

    fn try_from([lower, upper]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lower, upper)
    }
}

impl From<ConfidenceInterval> for [f64; 2] {
    fn from(ci: ConfidenceInterval) -> Self {
        [ci.lower, ci.upper]
    }
}

/// Resample count and significance level of a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapSettings {
    pub resamples: usize,
    /// The interval covers `1 - alpha` of the bootstrap distribution.
    pub alpha: f64,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self::from(&CompareConfig::default())
    }
}

impl From<&CompareConfig> for BootstrapSettings {
    fn from(config: &CompareConfig) -> Self {
        Self {
            resamples: config.effective_resamples(),
            alpha: config.effective_alpha(),
        }
    }
}

impl BootstrapSettings {
    fn validate(&self) -> Result<(), StatsError> {
        if self.resamples == 0 {
            return Err(StatsError::NoResamples);
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(StatsError::InvalidAlpha { alpha: self.alpha });
        }
        Ok(())
    }
}

fn check_samples(samples: &[f64], which: &'static str) -> Result<(), StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySample { which });
    }
    if samples.iter().any(|s| !s.is_finite()) {
        return Err(StatsError::NonFinite { which });
    }
    Ok(())
}

/// Draws `source.len()` values from `source` with replacement into `out`.
fn resample<R: Rng + ?Sized>(source: &[f64], rng: &mut R, out: &mut Vec<f64>) {
    out.clear();
    out.extend((0..source.len()).map(|_| source[rng.random_range(0..source.len())]));
}

/// Confidence interval of `median(after) - median(before)`, both scaled by
/// `median(before)`.
///
/// The sets may differ in size. Each resample draws as many values as the
/// original set holds; the bounds are the `alpha / 2` and `1 - alpha / 2`
/// quantiles of the resampled differences. Identical inputs and an
/// identically seeded `rng` give identical intervals.
pub fn bootstrap_median_difference<R: Rng + ?Sized>(
    before: &[f64],
    after: &[f64],
    settings: &BootstrapSettings,
    rng: &mut R,
) -> Result<ConfidenceInterval, StatsError> {
    settings.validate()?;
    check_samples(before, "before")?;
    check_samples(after, "after")?;

    let scale = median(before);
    if scale == 0.0 {
        return Err(StatsError::DegenerateScale { median: scale });
    }
    let before: Vec<f64> = before.iter().map(|s| s / scale).collect();
    let after: Vec<f64> = after.iter().map(|s| s / scale).collect();

    let mut a = Vec::with_capacity(before.len());
    let mut b = Vec::with_capacity(after.len());
    let mut differences = Vec::with_capacity(settings.resamples);
    for _ in 0..settings.resamples {
        resample(&before, rng, &mut a);
        resample(&after, rng, &mut b);
        differences.push(median_in_place(&mut b) - median_in_place(&mut a));
    }
    differences.sort_unstable_by(f64::total_cmp);

    let half = settings.alpha / 2.0;
    let interval = ConfidenceInterval::new(
        quantile_sorted(&differences, half),
        quantile_sorted(&differences, 1.0 - half),
    )?;
    debug!(
        lower = interval.lower(),
        upper = interval.upper(),
        resamples = settings.resamples,
        "bootstrapped median difference"
    );
    Ok(interval)
}

/// Bootstraps the interval and classifies it.
pub fn compare<R: Rng + ?Sized>(
    before: &[f64],
    after: &[f64],
    settings: &BootstrapSettings,
    rng: &mut R,
) -> Result<(ConfidenceInterval, Classification), StatsError> {
    let interval = bootstrap_median_difference(before, after, settings, rng)?;
    Ok((interval, interval.classify()))
}
