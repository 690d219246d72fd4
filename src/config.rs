//! Configuration management and validation.
//!
//! Provides configuration structures for the import pipeline (format hints,
//! fallback week start, source tagging, conflict policy) and for the
//! analytics layer (outlier window, ranking caps, rising threshold).

use crate::app::models::ConflictPolicy;
use crate::constants::{
    DEFAULT_MAX_OUTLIERS, DEFAULT_OUTLIER_WINDOW, DEFAULT_RISING_THRESHOLD_PCT,
    DEFAULT_SOURCE_TAG, DEFAULT_WORKSPACE, MIN_OUTLIER_HISTORY_WEEKS,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Options controlling a single CSV import (preview or commit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Workspace the import is scoped to; artists are unique per
    /// (workspace, name)
    pub workspace: String,

    /// Date format hint tried first for the week column, in date-fns style
    /// tokens ("MM/dd/yyyy") or chrono style ("%m/%d/%Y"). Defaults to
    /// MM/dd/yyyy when absent.
    pub week_format: Option<String>,

    /// Fallback week start applied to rows whose week could not be resolved
    /// from the file alone. Commit refuses rows that still lack a week.
    pub fallback_week_start: Option<NaiveDate>,

    /// Source/region tag stored on each fact ("us", "global", "upload", ...)
    pub source: String,

    /// What to do when a fact for (artist, week, source) already exists
    pub policy: ConflictPolicy,

    /// Original file name recorded on the upload, when known
    pub file_name: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            workspace: DEFAULT_WORKSPACE.to_string(),
            week_format: None,
            fallback_week_start: None,
            source: DEFAULT_SOURCE_TAG.to_string(),
            policy: ConflictPolicy::Skip,
            file_name: None,
        }
    }
}

impl ImportOptions {
    /// Validate option coherence
    pub fn validate(&self) -> Result<()> {
        if self.workspace.trim().is_empty() {
            return Err(Error::configuration("workspace must not be empty"));
        }
        if self.source.trim().is_empty() {
            return Err(Error::configuration("source tag must not be empty"));
        }
        if let Some(fmt) = &self.week_format {
            if fmt.trim().is_empty() {
                return Err(Error::configuration("week_format hint must not be empty"));
            }
        }
        Ok(())
    }
}

/// Configuration for aggregation and outlier detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of historical week-over-week deltas in the z-score window
    pub outlier_window: usize,

    /// Minimum weeks of history before an artist is eligible for ranking
    pub min_history_weeks: usize,

    /// Maximum number of ranked outliers returned
    pub max_outliers: usize,

    /// Growth percentage at or above which an aggregate is flagged rising
    pub rising_threshold_pct: f64,

    /// Restrict aggregation to a single source tag; when absent, sums span
    /// all sources and mixed-source aggregates are flagged as such
    pub source_filter: Option<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            outlier_window: DEFAULT_OUTLIER_WINDOW,
            min_history_weeks: MIN_OUTLIER_HISTORY_WEEKS,
            max_outliers: DEFAULT_MAX_OUTLIERS,
            rising_threshold_pct: DEFAULT_RISING_THRESHOLD_PCT,
            source_filter: None,
        }
    }
}

impl AnalyticsConfig {
    /// Validate analytics parameters
    pub fn validate(&self) -> Result<()> {
        if self.outlier_window == 0 {
            return Err(Error::configuration("outlier_window must be at least 1"));
        }
        if self.min_history_weeks < 2 {
            return Err(Error::configuration(
                "min_history_weeks must be at least 2 (one delta needs two weeks)",
            ));
        }
        if self.max_outliers == 0 {
            return Err(Error::configuration("max_outliers must be at least 1"));
        }
        if !self.rising_threshold_pct.is_finite() {
            return Err(Error::configuration("rising_threshold_pct must be finite"));
        }
        Ok(())
    }
}
