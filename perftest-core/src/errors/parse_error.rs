//! Timing-output parse errors.

use super::error_code::{self, PerftestErrorCode};

/// Errors that can occur while extracting a run time from program output.
///
/// Both variants carry the complete output. A crashed binary often leaves
/// its only clues in partial output, so it is never truncated.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Could not parse time in output:\n{output}")]
    MissingTime { output: String },

    #[error("Invalid time value \"{value}\" in output:\n{output}")]
    InvalidNumber { value: String, output: String },
}

impl ParseError {
    /// The full program output that failed to parse.
    pub fn output(&self) -> &str {
        match self {
            Self::MissingTime { output } | Self::InvalidNumber { output, .. } => output,
        }
    }
}

impl PerftestErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
