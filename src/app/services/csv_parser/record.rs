//! Per-row canonical field resolution
//!
//! A tokenized data row is a mapping from normalized header to raw cell
//! text. Resolution picks out the raw artist/streams/week cells through the
//! inferred [`HeaderMapping`], falling back to literal canonical keys so
//! already-normalized input still parses when no alias matched.

use std::collections::HashMap;

use super::header_map::{normalize_header, HeaderMapping};

/// A tokenized data row keyed by normalized header
pub type RawRow = HashMap<String, String>;

/// Raw cell values for the three canonical fields, before coercion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFields {
    pub artist: Option<String>,
    pub streams: Option<String>,
    pub week: Option<String>,
}

/// Extract the raw artist/streams/week cells from a row.
///
/// Pure with respect to I/O so coercion logic stays independently testable.
pub fn resolve_canonical_fields(row: &RawRow, mapping: &HeaderMapping) -> ResolvedFields {
    ResolvedFields {
        artist: lookup(row, mapping.artist_key.as_deref(), "artist"),
        streams: lookup(row, mapping.streams_key.as_deref(), "streams"),
        week: lookup(row, mapping.week_key.as_deref(), "week"),
    }
}

// Mapping keys hold the raw header spelling that matched; row keys are
// normalized, so the lookup normalizes the mapped key first.
fn lookup(row: &RawRow, mapped_key: Option<&str>, literal_key: &str) -> Option<String> {
    let key = match mapped_key {
        Some(raw) => normalize_header(raw),
        None => literal_key.to_string(),
    };
    row.get(&key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
