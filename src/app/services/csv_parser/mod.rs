//! Tolerant CSV parser for vendor streaming-export files
//!
//! This module turns a raw uploaded file buffer into normalized
//! (artist, streams, week) rows, surviving the quirks of real vendor
//! exports: banner/title rows before the header, copyright footers,
//! byte-order marks, inconsistent header spellings, thousands separators
//! and mixed date formats.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Core parsing orchestration over a file buffer
//! - [`row_cleaner`] - Banner/footer stripping before tokenizing
//! - [`header_map`] - Header alias matching to canonical fields
//! - [`record`] - Per-row canonical field resolution
//! - [`coercers`] - Number and date coercion utilities
//! - [`preview`] - Included/excluded row sets, warnings and statistics
//!
//! ## Usage
//!
//! ```rust
//! use streamstats::app::services::csv_parser::CsvParser;
//! use streamstats::config::ImportOptions;
//!
//! let options = ImportOptions::default();
//! let parser = CsvParser::new(&options);
//! let preview = parser.parse(b"Artist,Streams,Week\nDrake,100,2025-01-06\n");
//!
//! assert_eq!(preview.included.len(), 1);
//! assert!(preview.excluded.is_empty());
//! ```

pub mod coercers;
pub mod header_map;
pub mod parser;
pub mod preview;
pub mod record;
pub mod row_cleaner;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header_map::HeaderMapping;
pub use parser::CsvParser;
pub use preview::{ParsePreview, ParseStats};
