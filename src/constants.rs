//! Application constants for streamstats
//!
//! This module contains the header alias tables, vendor banner/footer
//! markers, date format lists, and default analytics parameters used
//! throughout the import and analytics pipeline.

// =============================================================================
// Header Aliases
// =============================================================================

/// Ordered aliases for the canonical artist column.
///
/// Matching is performed against the normalized header form (lowercased,
/// non-alphanumeric runs collapsed to single spaces), so "Artist_Name",
/// "ARTIST-NAME" and "artist name" all hit the same entry. First match wins.
pub const ARTIST_ALIASES: &[&str] = &[
    "artist",
    "artist name",
    "artistname",
    "name",
    "act",
    "performer",
    "creator",
];

/// Ordered aliases for the canonical streams column
pub const STREAMS_ALIASES: &[&str] = &[
    "streams",
    "total streams",
    "stream count",
    "plays",
    "total plays",
    "count",
    "units",
    "on demand audio streams",
    "ondemand audio streams",
    "audio streams",
    "weekly streams",
    "streams this week",
];

/// Ordered aliases for the canonical week column
pub const WEEK_ALIASES: &[&str] = &[
    "week",
    "week start",
    "date",
    "period",
    "start date",
    "week commencing",
    "week beginning",
    "week of",
];

// =============================================================================
// Vendor Export Cleanup
// =============================================================================

/// Normalized prefixes of banner/title lines that vendor exports prepend
/// before the real header row (e.g. "Favorite Artists,,,")
pub const BANNER_PREFIXES: &[&str] = &["favorite artists", "export"];

/// Normalized prefixes of footer lines appended after the data section
pub const FOOTER_PREFIXES: &[&str] = &["copyright", "generated on"];

/// Raw copyright markers checked before normalization strips punctuation
pub const COPYRIGHT_MARKERS: &[&str] = &["\u{a9}", "(c)"];

/// Normalized phrases that mark a line as vendor footer boilerplate
pub const FOOTER_PHRASES: &[&str] = &["all rights reserved", "music connect", "luminate"];

/// Byte-order mark stripped from decoded file text and header cells
pub const BOM_CHAR: char = '\u{feff}';

/// Delimiters tried during auto-detection, in preference order
pub const CANDIDATE_DELIMITERS: &[u8] = &[b',', b'\t', b';', b'|'];

// =============================================================================
// Date Formats
// =============================================================================

/// Default format hint for the week column when the caller supplies none
/// (date-fns style, the convention of the upload UI this tool replaced)
pub const DEFAULT_WEEK_FORMAT: &str = "MM/dd/yyyy";

/// Canonical ISO date format for week values at the boundary
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fallback chrono formats tried in order after the caller's hint.
///
/// chrono numeric specifiers accept unpadded fields, so "M/d/yyyy" and
/// "MM/dd/yyyy" collapse into a single entry here.
pub const WEEK_FALLBACK_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%d/%m/%Y"];

/// Last-resort formats for free-form week cells ("Jan 6, 2025", "20250106", ...)
pub const WEEK_LAST_RESORT_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y%m%d",
    "%Y.%m.%d",
    "%m-%d-%Y",
];

// =============================================================================
// Ingestion Defaults
// =============================================================================

/// Default source/region tag attached to imported facts
pub const DEFAULT_SOURCE_TAG: &str = "us";

/// Default workspace used when the caller does not scope the import
pub const DEFAULT_WORKSPACE: &str = "default";

// =============================================================================
// Analytics Defaults
// =============================================================================

/// Number of historical week-over-week deltas used for the z-score window
pub const DEFAULT_OUTLIER_WINDOW: usize = 8;

/// Minimum weeks of history before an artist is eligible for outlier ranking
pub const MIN_OUTLIER_HISTORY_WEEKS: usize = 3;

/// Maximum number of ranked outliers returned
pub const DEFAULT_MAX_OUTLIERS: usize = 50;

/// Week-over-week growth percentage above which an artist is flagged rising
pub const DEFAULT_RISING_THRESHOLD_PCT: f64 = 30.0;
