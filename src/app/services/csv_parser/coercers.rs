//! Number and date coercion for cell values of unknown shape
//!
//! Vendor exports format stream counts with thousands separators and use
//! whatever date convention the export UI was set to. These helpers
//! normalize both into canonical integer / `NaiveDate` form, returning
//! `None` rather than erroring so one bad cell never aborts a batch.

use crate::constants::{
    DEFAULT_WEEK_FORMAT, WEEK_FALLBACK_FORMATS, WEEK_LAST_RESORT_FORMATS,
};
use chrono::{Datelike, Days, NaiveDate};

/// Coerce a cell into a rounded stream count.
///
/// Strips thousands separators (commas), regular and non-breaking spaces,
/// then parses as a number and rounds to the nearest integer. Em-dash and
/// bare hyphen placeholders count as missing. Negative values pass through;
/// the ingestion layer clamps them at zero.
pub fn coerce_streams(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "\u{2014}" || trimmed == "-" {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && *c != ' ' && *c != '\u{a0}')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let parsed: f64 = cleaned.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Some(parsed.round() as i64)
}

/// Coerce a cell into an ISO week date.
///
/// Already-ISO values pass through (validated). Otherwise the attempts are,
/// in order: the caller's format hint (default MM/dd/yyyy), a fixed fallback
/// list, and a free-form last-resort set. First successful parse wins.
pub fn coerce_week(value: &str, hint: Option<&str>) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if looks_like_iso_date(trimmed) {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Some(date);
        }
    }

    let hint_format = translate_format_hint(hint.unwrap_or(DEFAULT_WEEK_FORMAT));
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, &hint_format) {
        return Some(date);
    }

    for format in WEEK_FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    for format in WEEK_LAST_RESORT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}

/// Translate a date-fns style pattern ("MM/dd/yyyy") into chrono specifiers.
///
/// Hints already containing `%` are taken as chrono formats verbatim.
/// Lowercase "mm" is accepted as a month token because export UIs commonly
/// write it that way.
pub fn translate_format_hint(hint: &str) -> String {
    if hint.contains('%') {
        return hint.to_string();
    }

    let mut out = String::with_capacity(hint.len());
    let chars: Vec<char> = hint.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == ch {
            run += 1;
        }
        match ch {
            'y' | 'Y' => out.push_str(if run >= 4 { "%Y" } else { "%y" }),
            'M' | 'm' => out.push_str("%m"),
            'd' | 'D' => out.push_str("%d"),
            _ => {
                for _ in 0..run {
                    out.push(ch);
                }
            }
        }
        i += run;
    }
    out
}

/// Compute the Monday of the given date's week.
///
/// Canonicalizes arbitrary within-week dates into a single comparable
/// week-start value. Offset is `(days_from_sunday + 6) % 7` days back.
pub fn week_start_monday(date: NaiveDate) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 6) % 7;
    date.checked_sub_days(Days::new(offset as u64)).unwrap_or(date)
}

fn looks_like_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}
