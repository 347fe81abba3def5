//! Run time extraction from benchmark output.

use std::sync::LazyLock;

use perftest_core::errors::ParseError;
use regex::Regex;

/// The canonical time report: `[s]` followed by the time in seconds.
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[s\]\s*([0-9.]+)").expect("time pattern is valid"));

/// Parses the run time in seconds from STELLA or GridTools stdout.
///
/// The whole output is searched as one block. If several time lines are
/// present the last one is used. A value too large for an `f64` is
/// rejected as invalid.
pub fn parse_time(output: &str) -> Result<f64, ParseError> {
    let captures = TIME_PATTERN
        .captures_iter(output)
        .last()
        .ok_or_else(|| ParseError::MissingTime {
            output: output.to_string(),
        })?;
    let value = &captures[1];
    value
        .parse::<f64>()
        .ok()
        .filter(|time| time.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            value: value.to_string(),
            output: output.to_string(),
        })
}
