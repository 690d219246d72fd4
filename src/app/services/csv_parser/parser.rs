//! Core CSV parsing orchestration
//!
//! Coordinates decoding, row cleaning, delimiter detection, header mapping
//! and per-cell coercion over a raw file buffer, producing a
//! [`ParsePreview`] with included/excluded row sets and warnings. Parsing
//! never fails structurally: an unusable file yields an empty included set
//! plus warnings so the caller can show partial feedback without crashing.

use tracing::{debug, info};

use super::coercers::{coerce_streams, coerce_week};
use super::header_map::{normalize_header, HeaderMapping};
use super::preview::{ParsePreview, ParseStats};
use super::record::{resolve_canonical_fields, RawRow};
use super::row_cleaner;
use crate::app::models::{NormalizedRow, SkippedRow};
use crate::config::ImportOptions;

/// Tolerant parser for vendor streaming-export CSV files
#[derive(Debug, Clone)]
pub struct CsvParser {
    week_format: Option<String>,
}

impl CsvParser {
    /// Create a parser configured from import options
    pub fn new(options: &ImportOptions) -> Self {
        Self {
            week_format: options.week_format.clone(),
        }
    }

    /// Parse a raw file buffer into a preview.
    ///
    /// Bytes are decoded as UTF-8 with invalid sequences replaced, so a
    /// mangled file degrades to warnings rather than a hard failure.
    pub fn parse(&self, bytes: &[u8]) -> ParsePreview {
        let text = String::from_utf8_lossy(bytes);
        let cleaned = row_cleaner::clean(&text);

        let mut warnings = Vec::new();
        let mut stats = ParseStats::new();

        if cleaned.trim().is_empty() {
            warnings.push("File contains no header or data rows.".to_string());
            return ParsePreview {
                included: Vec::new(),
                excluded: Vec::new(),
                warnings,
                header_mapping: HeaderMapping {
                    artist_key: None,
                    streams_key: None,
                    week_key: None,
                },
                stats,
            };
        }

        let header_line = cleaned.lines().next().unwrap_or("");
        let delimiter = row_cleaner::best_delimiter(header_line);
        debug!("Detected delimiter: {:?}", delimiter as char);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(cleaned.as_bytes());

        let raw_headers: Vec<String> = match reader.headers() {
            Ok(headers) => headers.iter().map(|h| h.to_string()).collect(),
            Err(e) => {
                warnings.push(format!("Could not read header row: {e}"));
                Vec::new()
            }
        };
        let normalized_headers: Vec<String> =
            raw_headers.iter().map(|h| normalize_header(h)).collect();

        let header_mapping = HeaderMapping::infer(&raw_headers);
        warnings.extend(header_mapping.warnings());
        debug!(?header_mapping, "Inferred header mapping");

        let mut included = Vec::new();
        let mut excluded = Vec::new();

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    stats.total_rows += 1;
                    stats.excluded += 1;
                    warnings.push(format!("Skipped unreadable row: {e}"));
                    continue;
                }
            };

            // Greedy empty-line handling: rows with no content at all are
            // ignored entirely rather than reported as skips
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            stats.total_rows += 1;

            let row: RawRow = normalized_headers
                .iter()
                .cloned()
                .zip(record.iter().map(|cell| cell.to_string()))
                .collect();

            let fields = resolve_canonical_fields(&row, &header_mapping);
            let artist = fields.artist.clone().filter(|a| !a.is_empty());
            let streams = fields.streams.as_deref().and_then(coerce_streams);
            let week = fields
                .week
                .as_deref()
                .and_then(|w| coerce_week(w, self.week_format.as_deref()));

            match (artist, streams) {
                (Some(artist), Some(streams)) => {
                    stats.included += 1;
                    included.push(NormalizedRow {
                        artist,
                        streams,
                        week,
                    });
                }
                (artist, streams) => {
                    let mut missing = Vec::new();
                    if artist.is_none() {
                        missing.push("artist");
                    }
                    if streams.is_none() {
                        missing.push("streams");
                    }
                    if week.is_none() {
                        missing.push("week");
                    }
                    let skipped = SkippedRow {
                        artist,
                        streams,
                        week,
                        missing,
                    };
                    warnings.push(skipped.reason());
                    stats.excluded += 1;
                    excluded.push(skipped);
                }
            }
        }

        info!(
            "Parsed {} rows: {} included, {} excluded",
            stats.total_rows, stats.included, stats.excluded
        );

        ParsePreview {
            included,
            excluded,
            warnings,
            header_mapping,
            stats,
        }
    }
}
