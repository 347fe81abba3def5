//! Statistics errors.

use super::error_code::{self, PerftestErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Sample set \"{which}\" is empty")]
    EmptySample { which: &'static str },

    #[error("Cannot scale by median {median} of the before samples")]
    DegenerateScale { median: f64 },

    #[error("Number of resamples must be at least 1")]
    NoResamples,

    #[error("Alpha must lie in (0, 1), got {alpha}")]
    InvalidAlpha { alpha: f64 },

    #[error("Sample set \"{which}\" contains a non-finite value")]
    NonFinite { which: &'static str },

    #[error("Invalid confidence interval [{lower}, {upper}]")]
    InvalidInterval { lower: f64, upper: f64 },
}

impl PerftestErrorCode for StatsError {
    fn error_code(&self) -> &'static str {
        error_code::STATS_ERROR
    }
}
