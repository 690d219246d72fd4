//! Streamstats Library
//!
//! A Rust library for ingesting weekly music-streaming CSV exports and
//! computing per-artist analytics over the resulting stream facts.
//!
//! This library provides tools for:
//! - Tolerant parsing of vendor CSV exports with banner/footer rows and
//!   inconsistent header spellings
//! - Coercing locale-formatted numbers and dates into canonical form
//! - Persisting per-artist weekly stream facts behind a repository-style
//!   store interface (SQLite or in-memory)
//! - Computing weekly aggregates with week-over-week growth rates
//! - Ranking z-score outliers against each artist's own recent volatility

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod analytics;
        pub mod csv_parser;
        pub mod ingestion;
    }
    pub mod storage;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ConflictPolicy, NormalizedRow, StreamFact, WeeklyAggregate};
pub use config::{AnalyticsConfig, ImportOptions};

/// Result type alias for streamstats operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for import and analytics operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV tokenizing error
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// File structure error (no usable header, empty file, ...)
    #[error("File format error: {message}")]
    FileFormat { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date parsing error
    #[error("Date parsing error: {message}")]
    DateParse {
        message: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// Storage operation failed. Uniqueness conflicts are NOT errors,
    /// they are reported as skip/update outcomes by the ingestion layer.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Rows still lack a week value at commit time
    #[error(
        "{rows} row(s) have no resolvable week; supply a fallback week start before importing"
    )]
    MissingWeek { rows: usize },

    /// Artist not found in the store
    #[error("Artist not found: id = {artist_id}")]
    ArtistNotFound { artist_id: i64 },

    /// Upload not found in the store
    #[error("Upload not found: id = {upload_id}")]
    UploadNotFound { upload_id: i64 },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a file format error
    pub fn file_format(message: impl Into<String>) -> Self {
        Self::FileFormat {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parse(message: impl Into<String>, source: Option<chrono::ParseError>) -> Self {
        Self::DateParse {
            message: message.into(),
            source,
        }
    }

    /// Create a storage error with context
    pub fn storage(message: impl Into<String>, source: Option<rusqlite::Error>) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    /// Create a missing-week commit error
    pub fn missing_week(rows: usize) -> Self {
        Self::MissingWeek { rows }
    }

    /// Create an artist-not-found error
    pub fn artist_not_found(artist_id: i64) -> Self {
        Self::ArtistNotFound { artist_id }
    }

    /// Create an upload-not-found error
    pub fn upload_not_found(upload_id: i64) -> Self {
        Self::UploadNotFound { upload_id }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateParse {
            message: "Date parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage {
            message: "Storage operation failed".to_string(),
            source: Some(error),
        }
    }
}
