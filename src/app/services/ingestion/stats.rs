//! Import outcome counters

use serde::{Deserialize, Serialize};

/// Counts reported back to the caller after a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Facts newly created
    pub created: usize,

    /// Rows skipped because their (artist, week, source) key already
    /// existed under the skip policy
    pub skipped: usize,

    /// Existing facts replaced under the overwrite policy
    pub updated: usize,
}

impl ImportOutcome {
    /// Total rows the commit attempted
    pub fn total(&self) -> usize {
        self.created + self.skipped + self.updated
    }

    /// One-line summary for logging and CLI output
    pub fn summary(&self) -> String {
        format!(
            "created {} | skipped {} | updated {} (of {})",
            self.created,
            self.skipped,
            self.updated,
            self.total()
        )
    }
}
