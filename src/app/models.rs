//! Core data models for the streamstats pipeline
//!
//! Defines the normalized row produced by parsing, the persisted stream
//! fact and its surrounding entities (artist, upload), and the derived
//! analytics records (weekly aggregate, outlier score).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single normalized data row produced by the CSV parsing pipeline.
///
/// Rows are produced fresh on every import request and discarded after
/// being turned into [`StreamFact`]s (or after preview display). A row
/// only reaches the included set when both `artist` and `streams`
/// resolved; `week` may stay absent until backfilled from a caller
/// supplied fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// Trimmed, non-empty artist name
    pub artist: String,

    /// Rounded stream count; may be negative until the ingestion clamp
    pub streams: i64,

    /// Week value, absent when the file had no resolvable date
    pub week: Option<NaiveDate>,
}

impl NormalizedRow {
    /// Week formatted as ISO yyyy-MM-dd for display, when present
    pub fn week_iso(&self) -> Option<String> {
        self.week.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// A row routed to the excluded set, with whatever values did resolve
/// and the list of canonical fields that were missing or uncoercible.
/// Serialize-only: previews are rendered as JSON, never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub artist: Option<String>,
    pub streams: Option<i64>,
    pub week: Option<NaiveDate>,

    /// Canonical field names that failed to resolve ("artist", "streams", "week")
    pub missing: Vec<&'static str>,
}

impl SkippedRow {
    /// Human-readable skip reason matching the preview warning format
    pub fn reason(&self) -> String {
        format!("Skipped row missing: {}", self.missing.join(", "))
    }
}

/// An artist record, unique per (workspace, name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub workspace: String,
    pub name: String,
}

/// A committed import batch; facts carry the upload id so a whole
/// import can be deleted in one cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    pub id: i64,
    pub workspace: String,
    pub file_name: Option<String>,
    pub source: String,
    pub imported_at: DateTime<Utc>,
}

/// Persisted weekly stream count, unique per (artist_id, week_start, source).
///
/// The uniqueness key is what makes repeated imports of overlapping weeks
/// idempotent: a conflicting insert is a skip (or an update under the
/// overwrite policy), never a silent duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFact {
    pub artist_id: i64,
    pub week_start: NaiveDate,
    pub source: String,
    pub streams: i64,
    pub upload_id: Option<i64>,
}

impl StreamFact {
    /// Build a fact, clamping negative stream counts to zero.
    ///
    /// The coercer accepts negative values; the floor-at-zero here is the
    /// storage-side normalization rule.
    pub fn new(
        artist_id: i64,
        week_start: NaiveDate,
        source: impl Into<String>,
        streams: i64,
        upload_id: Option<i64>,
    ) -> Self {
        Self {
            artist_id,
            week_start,
            source: source.into(),
            streams: streams.max(0),
            upload_id,
        }
    }
}

/// Conflict policy for inserting a fact whose (artist, week, source) key
/// already exists in the store
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Leave the existing fact untouched and count the row as skipped
    #[default]
    Skip,
    /// Update the stored stream count and count the row as updated
    Overwrite,
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictPolicy::Skip => write!(f, "skip"),
            ConflictPolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Outcome of a single fact insert under a [`ConflictPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// No existing fact; a new row was created
    Created,
    /// Key existed and the skip policy left it untouched
    SkippedConflict,
    /// Key existed and the overwrite policy replaced the stream count
    Updated,
}

/// Derived per-artist weekly aggregate. Computed on read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    pub artist_id: i64,
    pub name: String,

    /// Sum of streams over all weeks and sources in scope
    pub total_streams: i64,

    /// Sum restricted to the latest known week in scope
    pub this_week: i64,

    /// Sum restricted to the week immediately before the latest
    pub prev_week: i64,

    /// Week-over-week growth percentage. `None` whenever `prev_week` is
    /// zero or absent; callers must render that as a neutral state, never
    /// as 0% or a spike.
    pub growth_rate_pct: Option<f64>,

    /// Growth at or above the configured rising threshold
    pub rising: bool,

    /// Sums span more than one source tag and no source filter was applied
    pub mixed_sources: bool,
}

impl WeeklyAggregate {
    /// Growth rounded to one decimal for display; full precision is kept
    /// in `growth_rate_pct`
    pub fn growth_display(&self) -> Option<f64> {
        self.growth_rate_pct.map(|g| (g * 10.0).round() / 10.0)
    }
}

/// Z-score ranking entry for an artist's most recent week-over-week change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierScore {
    pub artist_id: i64,
    pub latest_week: NaiveDate,

    /// Stream count at the latest week
    pub streams: i64,

    /// Latest week-over-week delta
    pub wow_change: i64,

    /// `wow_change / prev_week_streams` when the previous week was positive,
    /// otherwise 0 (display only)
    pub pct_change: f64,

    /// Deviation of the latest delta from the artist's own recent delta
    /// history, in standard deviations; 0 when that history has no spread
    pub z_score: f64,
}
