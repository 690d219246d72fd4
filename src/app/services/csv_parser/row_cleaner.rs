//! Pre-clean of raw file text before tokenizing
//!
//! Vendor exports prepend a banner/title line ("Favorite Artists,,,") and
//! append a copyright footer; naive header-based parsing would treat the
//! banner as the header row and the footer as data. This module locates
//! the real header row and strips the boilerplate around the data section.

use super::header_map::normalize_header;
use crate::constants::{
    ARTIST_ALIASES, BANNER_PREFIXES, BOM_CHAR, CANDIDATE_DELIMITERS, COPYRIGHT_MARKERS,
    FOOTER_PHRASES, FOOTER_PREFIXES,
};

/// Clean raw decoded file text so the first remaining line is the header row
/// and no footer boilerplate survives into the data section.
pub fn clean(text: &str) -> String {
    let text = text.strip_prefix(BOM_CHAR).unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    // Locate the real header row; everything before it is banner noise.
    // When no line looks like a header, assume the header is on line 1.
    let header_index = lines.iter().position(|line| looks_like_header(line));
    let start = header_index.unwrap_or(0);

    // Walk back from the end past blank lines and footer boilerplate
    let mut end = lines.len();
    while end > start + 1 {
        let line = lines[end - 1];
        if line.trim().is_empty() || looks_like_footer(line) {
            end -= 1;
        } else {
            break;
        }
    }

    lines[start..end].join("\n")
}

/// A line is the header row when one of its cells normalizes to a known
/// artist-column alias. Banner lines like "Favorite Artists,,," contain the
/// word "artists" but no cell matches an alias exactly, so they fail here.
pub fn looks_like_header(line: &str) -> bool {
    let normalized_line = normalize_header(line);
    if BANNER_PREFIXES
        .iter()
        .any(|p| normalized_line.starts_with(p))
    {
        return false;
    }

    let delimiter = best_delimiter(line);
    line.split(delimiter as char).any(|cell| {
        let norm = normalize_header(cell);
        ARTIST_ALIASES.contains(&norm.as_str())
    })
}

/// Footer boilerplate: a copyright marker at the start of the line, or a
/// known vendor footer phrase anywhere in it.
pub fn looks_like_footer(line: &str) -> bool {
    let trimmed = line.trim().to_lowercase();
    if COPYRIGHT_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        return true;
    }

    let normalized = normalize_header(line);
    FOOTER_PREFIXES.iter().any(|p| normalized.starts_with(p))
        || FOOTER_PHRASES.iter().any(|p| normalized.contains(p))
}

/// Pick the candidate delimiter occurring most often outside quoted cells.
/// Ties resolve in candidate order; a line with no delimiters gets a comma.
pub fn best_delimiter(line: &str) -> u8 {
    let mut best = CANDIDATE_DELIMITERS[0];
    let mut best_count = 0usize;

    for &candidate in CANDIDATE_DELIMITERS {
        let mut count = 0usize;
        let mut in_quotes = false;
        for byte in line.bytes() {
            match byte {
                b'"' => in_quotes = !in_quotes,
                b if b == candidate && !in_quotes => count += 1,
                _ => {}
            }
        }
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }

    best
}
