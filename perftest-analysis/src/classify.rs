//! Discrete change tags for a confidence interval of relative change.

use std::fmt;
use std::str::FromStr;

use perftest_core::errors::ArgumentError;
use serde::{Deserialize, Serialize};

use crate::bootstrap::ConfidenceInterval;

/// Outcome of a comparison. `+` tags mean faster, `-` tags slower; more
/// symbols mean a larger change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Interval wider than 0.1; no statement possible.
    #[serde(rename = "??")]
    Indeterminate,
    #[serde(rename = "=")]
    Unchanged,
    #[serde(rename = "(=)")]
    ProbablyUnchanged,
    /// Contains 0 but reaches up to 5% either way.
    #[serde(rename = "?")]
    Uncertain,
    #[serde(rename = "(+)")]
    SlightlyFaster,
    #[serde(rename = "+")]
    Faster,
    #[serde(rename = "++")]
    MuchFaster,
    #[serde(rename = "+++")]
    DramaticallyFaster,
    #[serde(rename = "(-)")]
    SlightlySlower,
    #[serde(rename = "-")]
    Slower,
    #[serde(rename = "--")]
    MuchSlower,
    #[serde(rename = "---")]
    DramaticallySlower,
    /// Narrow but straddling 0 beyond the 5% band.
    #[serde(rename = "???")]
    Unknown,
}

/// Coarse reading of a [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Faster,
    Slower,
    Unchanged,
    Unknown,
}

impl Classification {
    pub const ALL: &'static [Classification] = &[
        Self::Indeterminate,
        Self::Unchanged,
        Self::ProbablyUnchanged,
        Self::Uncertain,
        Self::SlightlyFaster,
        Self::Faster,
        Self::MuchFaster,
        Self::DramaticallyFaster,
        Self::SlightlySlower,
        Self::Slower,
        Self::MuchSlower,
        Self::DramaticallySlower,
        Self::Unknown,
    ];

    /// First matching rule wins; the order of the checks matters at the
    /// shared boundaries.
    pub fn from_interval(ci: &ConfidenceInterval) -> Self {
        let (lower, upper) = (ci.lower(), ci.upper());
        let within = |bound: f64| -bound <= lower && lower <= 0.0 && 0.0 <= upper && upper <= bound;

        if upper - lower > 0.1 {
            Self::Indeterminate
        } else if within(0.01) {
            Self::Unchanged
        } else if -0.02 <= lower && upper <= 0.02 {
            Self::ProbablyUnchanged
        } else if within(0.05) {
            Self::Uncertain
        } else if (-0.01..=0.0).contains(&upper) {
            Self::SlightlyFaster
        } else if (-0.05..=-0.01).contains(&upper) {
            Self::Faster
        } else if (-0.1..=-0.05).contains(&upper) {
            Self::MuchFaster
        } else if upper <= -0.1 {
            Self::DramaticallyFaster
        } else if (0.0..=0.01).contains(&lower) {
            Self::SlightlySlower
        } else if (0.01..=0.05).contains(&lower) {
            Self::Slower
        } else if (0.05..=0.1).contains(&lower) {
            Self::MuchSlower
        } else if lower >= 0.1 {
            Self::DramaticallySlower
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indeterminate => "??",
            Self::Unchanged => "=",
            Self::ProbablyUnchanged => "(=)",
            Self::Uncertain => "?",
            Self::SlightlyFaster => "(+)",
            Self::Faster => "+",
            Self::MuchFaster => "++",
            Self::DramaticallyFaster => "+++",
            Self::SlightlySlower => "(-)",
            Self::Slower => "-",
            Self::MuchSlower => "--",
            Self::DramaticallySlower => "---",
            Self::Unknown => "???",
        }
    }

    /// Everything except a confident "no change" is worth reporting.
    pub fn is_significant(&self) -> bool {
        *self != Self::Unchanged
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::SlightlyFaster | Self::Faster | Self::MuchFaster | Self::DramaticallyFaster => {
                Direction::Faster
            }
            Self::SlightlySlower | Self::Slower | Self::MuchSlower | Self::DramaticallySlower => {
                Direction::Slower
            }
            Self::Unchanged | Self::ProbablyUnchanged | Self::Uncertain => Direction::Unchanged,
            Self::Indeterminate | Self::Unknown => Direction::Unknown,
        }
    }

    /// Style class for report output: `bad` for any `-`, `unknown` for any
    /// `?`, `good` for any `+`.
    pub fn css_class(&self) -> Option<&'static str> {
        let tag = self.as_str();
        if tag.contains('-') {
            Some("bad")
        } else if tag.contains('?') {
            Some("unknown")
        } else if tag.contains('+') {
            Some("good")
        } else {
            None
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ArgumentError::Unknown {
                kind: "classification",
                value: s.to_string(),
            })
    }
}
