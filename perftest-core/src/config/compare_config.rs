//! Comparison configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the bootstrap comparison of two runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompareConfig {
    /// Bootstrap resamples. Default: 1000.
    pub resamples: Option<usize>,
    /// Significance level; the interval covers `1 - alpha`. Default: 0.05.
    pub alpha: Option<f64>,
    /// Seed for the resampling generator. Unset means entropy-seeded.
    pub seed: Option<u64>,
}

pub const DEFAULT_RESAMPLES: usize = 1000;
pub const DEFAULT_ALPHA: f64 = 0.05;

impl CompareConfig {
    pub fn effective_resamples(&self) -> usize {
        self.resamples.unwrap_or(DEFAULT_RESAMPLES)
    }

    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(DEFAULT_ALPHA)
    }
}
