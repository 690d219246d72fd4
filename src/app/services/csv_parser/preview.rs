//! Parse result structures for the preview/import pipeline
//!
//! The preview is what the upload UI shows before commit: the rows that
//! will be imported, the rows that were skipped and why, and any
//! header-level warnings.

use chrono::NaiveDate;

use super::header_map::HeaderMapping;
use crate::app::models::{NormalizedRow, SkippedRow};

/// Result of parsing one uploaded file
#[derive(Debug, Clone, serde::Serialize)]
pub struct ParsePreview {
    /// Rows with a resolvable artist and stream count, eligible for import
    /// once every week value is present
    pub included: Vec<NormalizedRow>,

    /// Rows excluded for missing/uncoercible required fields
    pub excluded: Vec<SkippedRow>,

    /// Header-level and per-row warnings, human readable
    pub warnings: Vec<String>,

    /// How the file's headers mapped onto canonical fields
    pub header_mapping: HeaderMapping,

    /// Row-count statistics
    pub stats: ParseStats,
}

impl ParsePreview {
    /// Backfill rows whose week could not be resolved from the file with a
    /// caller-supplied fallback week start
    pub fn apply_week_start_to_missing(&mut self, week_start: NaiveDate) {
        for row in &mut self.included {
            if row.week.is_none() {
                row.week = Some(week_start);
            }
        }
    }

    /// Number of included rows still lacking a week value
    pub fn rows_missing_week(&self) -> usize {
        self.included.iter().filter(|r| r.week.is_none()).count()
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered after cleaning
    pub total_rows: usize,

    /// Rows that reached the included set
    pub included: usize,

    /// Rows routed to the excluded set
    pub excluded: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            included: 0,
            excluded: 0,
        }
    }

    /// Calculate inclusion rate as a percentage
    pub fn inclusion_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.included as f64 / self.total_rows as f64) * 100.0
        }
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
