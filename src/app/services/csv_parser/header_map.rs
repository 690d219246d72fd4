//! Header normalization and alias matching
//!
//! Maps arbitrary raw header spellings ("Artist_Name", "ARTIST-NAME",
//! "On-Demand Audio Streams") to the three canonical fields the pipeline
//! cares about: artist, streams and week.

use crate::constants::{ARTIST_ALIASES, BOM_CHAR, STREAMS_ALIASES, WEEK_ALIASES};

/// Normalize a raw header for alias comparison.
///
/// Strips any BOM characters, lowercases, collapses every run of
/// non-alphanumeric characters into a single space and trims. The result
/// is stable under repeated application.
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.chars() {
        if ch == BOM_CHAR {
            continue;
        }
        if ch.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}

/// Result of matching a file's raw headers against the alias tables.
///
/// Each canonical field holds the raw header spelling that matched, or
/// `None` when no alias matched. Callers fall back to literal
/// `artist`/`streams`/`week` keys (or reject the file) on `None`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HeaderMapping {
    pub artist_key: Option<String>,
    pub streams_key: Option<String>,
    pub week_key: Option<String>,
}

impl HeaderMapping {
    /// Match raw headers against the ordered alias lists.
    ///
    /// For each canonical field the alias list is scanned in order and the
    /// first raw header whose normalized form equals an alias wins. No
    /// scoring or fuzzy matching.
    pub fn infer(headers: &[String]) -> Self {
        let normalized: Vec<(&String, String)> =
            headers.iter().map(|h| (h, normalize_header(h))).collect();

        let find_key = |aliases: &[&str]| -> Option<String> {
            for alias in aliases {
                for (raw, norm) in &normalized {
                    if norm == alias {
                        return Some((*raw).clone());
                    }
                }
            }
            None
        };

        Self {
            artist_key: find_key(ARTIST_ALIASES),
            streams_key: find_key(STREAMS_ALIASES),
            week_key: find_key(WEEK_ALIASES),
        }
    }

    /// True when every canonical field matched a header
    pub fn is_complete(&self) -> bool {
        self.artist_key.is_some() && self.streams_key.is_some() && self.week_key.is_some()
    }

    /// Preview warnings for canonical fields with no matching column
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.artist_key.is_none() {
            warnings.push("Could not find an Artist column.".to_string());
        }
        if self.streams_key.is_none() {
            warnings.push("Could not find a Streams/Plays column.".to_string());
        }
        if self.week_key.is_none() {
            warnings.push(
                "No Week/Date column found. A fallback week start will be required.".to_string(),
            );
        }
        warnings
    }
}
