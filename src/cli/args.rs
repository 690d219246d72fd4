//! Command-line argument definitions for streamstats
//!
//! Defines the CLI surface using the clap derive API: previewing and
//! importing vendor CSV exports, listing aggregates and outliers, and
//! managing uploads and the watchlist.

use crate::app::models::ConflictPolicy;
use crate::constants::{DEFAULT_SOURCE_TAG, DEFAULT_WORKSPACE};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the streamstats importer and dashboard
#[derive(Debug, Clone, Parser)]
#[command(
    name = "streamstats",
    version,
    about = "Import weekly music-streaming CSV exports and compute growth and outlier analytics",
    long_about = "Ingests weekly vendor CSV exports (banner rows, copyright footers, \
                  inconsistent headers, locale numbers and dates included), normalizes them \
                  into per-artist weekly stream facts in SQLite, and computes weekly \
                  aggregates, growth rates and z-score outlier rankings on demand."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a CSV export and show what an import would do, without writing
    Preview(PreviewArgs),
    /// Parse a CSV export and commit its rows as stream facts
    Import(ImportArgs),
    /// Per-artist weekly aggregates with week-over-week growth
    Artists(ArtistsArgs),
    /// Rank notable movers by z-score of the latest week-over-week change
    Outliers(OutliersArgs),
    /// Aggregates scoped to the starred artists on a watchlist
    Watchlist(WatchlistArgs),
    /// Star or unstar an artist on a watchlist
    Star(StarArgs),
    /// List committed uploads
    Uploads(UploadsArgs),
    /// Delete an upload and every fact it created
    DeleteUpload(DeleteUploadArgs),
}

/// Output rendering for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Arguments for the preview command
#[derive(Debug, Clone, Parser)]
pub struct PreviewArgs {
    /// CSV file to parse
    pub file: PathBuf,

    /// Date format tried first for the week column (date-fns style like
    /// "MM/dd/yyyy" or chrono style like "%m/%d/%Y")
    #[arg(long = "week-format", value_name = "FORMAT")]
    pub week_format: Option<String>,

    /// Fallback week start (ISO yyyy-MM-dd) applied to rows with no
    /// resolvable date
    #[arg(long = "week-start", value_name = "DATE")]
    pub week_start: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// CSV file to import
    pub file: PathBuf,

    /// SQLite database path
    #[arg(long = "db", value_name = "PATH", default_value = "streamstats.db")]
    pub db_path: PathBuf,

    /// Workspace the import is scoped to
    #[arg(long, default_value = DEFAULT_WORKSPACE)]
    pub workspace: String,

    /// Date format tried first for the week column
    #[arg(long = "week-format", value_name = "FORMAT")]
    pub week_format: Option<String>,

    /// Fallback week start (ISO yyyy-MM-dd); required when the file has no
    /// resolvable date column
    #[arg(long = "week-start", value_name = "DATE")]
    pub week_start: Option<String>,

    /// Source/region tag stored on each fact
    #[arg(long, default_value = DEFAULT_SOURCE_TAG)]
    pub source: String,

    /// What to do when a fact for (artist, week, source) already exists
    #[arg(long, value_enum, default_value = "skip")]
    pub policy: ConflictPolicy,
}

/// Arguments for the artists command
#[derive(Debug, Clone, Parser)]
pub struct ArtistsArgs {
    /// SQLite database path
    #[arg(long = "db", value_name = "PATH", default_value = "streamstats.db")]
    pub db_path: PathBuf,

    /// Workspace to aggregate
    #[arg(long, default_value = DEFAULT_WORKSPACE)]
    pub workspace: String,

    /// Restrict sums to a single source tag; without it, sums span all
    /// sources and mixed-source artists are flagged
    #[arg(long, value_name = "TAG")]
    pub source: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the outliers command
#[derive(Debug, Clone, Parser)]
pub struct OutliersArgs {
    /// SQLite database path
    #[arg(long = "db", value_name = "PATH", default_value = "streamstats.db")]
    pub db_path: PathBuf,

    /// Workspace to rank
    #[arg(long, default_value = DEFAULT_WORKSPACE)]
    pub workspace: String,

    /// Historical deltas in the z-score window
    #[arg(long, value_name = "N", default_value_t = 8)]
    pub window: usize,

    /// Maximum number of ranked outliers returned
    #[arg(long, value_name = "N", default_value_t = 50)]
    pub limit: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the watchlist command
#[derive(Debug, Clone, Parser)]
pub struct WatchlistArgs {
    /// SQLite database path
    #[arg(long = "db", value_name = "PATH", default_value = "streamstats.db")]
    pub db_path: PathBuf,

    /// Workspace the watchlist artists belong to
    #[arg(long, default_value = DEFAULT_WORKSPACE)]
    pub workspace: String,

    /// Watchlist owner
    #[arg(long, default_value = "default")]
    pub user: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the star command
#[derive(Debug, Clone, Parser)]
pub struct StarArgs {
    /// Artist name (case-insensitive match within the workspace)
    pub artist: String,

    /// SQLite database path
    #[arg(long = "db", value_name = "PATH", default_value = "streamstats.db")]
    pub db_path: PathBuf,

    /// Workspace the artist belongs to
    #[arg(long, default_value = DEFAULT_WORKSPACE)]
    pub workspace: String,

    /// Watchlist owner
    #[arg(long, default_value = "default")]
    pub user: String,

    /// Remove the star instead of adding it
    #[arg(long)]
    pub remove: bool,
}

/// Arguments for the uploads command
#[derive(Debug, Clone, Parser)]
pub struct UploadsArgs {
    /// SQLite database path
    #[arg(long = "db", value_name = "PATH", default_value = "streamstats.db")]
    pub db_path: PathBuf,

    /// Workspace to list
    #[arg(long, default_value = DEFAULT_WORKSPACE)]
    pub workspace: String,
}

/// Arguments for the delete-upload command
#[derive(Debug, Clone, Parser)]
pub struct DeleteUploadArgs {
    /// Upload id to delete
    pub upload_id: i64,

    /// SQLite database path
    #[arg(long = "db", value_name = "PATH", default_value = "streamstats.db")]
    pub db_path: PathBuf,
}
