//! History configuration.

use serde::{Deserialize, Serialize};

use crate::types::TimestampSource;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HistoryConfig {
    /// Timestamp that orders runs. Default: job.
    pub timestamp: Option<TimestampSource>,
    /// Keep only the most recent runs. Default: all.
    pub limit: Option<usize>,
}

impl HistoryConfig {
    pub fn effective_timestamp(&self) -> TimestampSource {
        self.timestamp.unwrap_or(TimestampSource::Job)
    }
}
