//! Command implementations for the streamstats CLI
//!
//! Each subcommand reads its inputs, drives the library pipeline and
//! renders either a human table or JSON. All storage access goes through
//! the SQLite-backed [`FactStore`].

use std::fs;

use chrono::NaiveDate;
use colored::Colorize;

use crate::app::models::Artist;
use crate::app::services::analytics::{compute_weekly_aggregates, rank_outliers};
use crate::app::services::csv_parser::{CsvParser, ParsePreview};
use crate::app::services::ingestion::Importer;
use crate::app::storage::{FactStore, SqliteFactStore};
use crate::cli::args::{
    Args, ArtistsArgs, Commands, DeleteUploadArgs, ImportArgs, OutliersArgs, OutputFormat,
    PreviewArgs, StarArgs, UploadsArgs, WatchlistArgs,
};
use crate::config::{AnalyticsConfig, ImportOptions};
use crate::{Error, Result};

/// Dispatch to the subcommand handler
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Preview(args) => run_preview(args),
        Commands::Import(args) => run_import(args),
        Commands::Artists(args) => run_artists(args),
        Commands::Outliers(args) => run_outliers(args),
        Commands::Watchlist(args) => run_watchlist(args),
        Commands::Star(args) => run_star(args),
        Commands::Uploads(args) => run_uploads(args),
        Commands::DeleteUpload(args) => run_delete_upload(args),
    }
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .map_err(|e| Error::io(format!("Failed to read {}", args.file.display()), e))?;

    let options = ImportOptions {
        week_format: args.week_format,
        ..Default::default()
    };
    let parser = CsvParser::new(&options);
    let mut preview = parser.parse(&bytes);

    if let Some(week_start) = &args.week_start {
        preview.apply_week_start_to_missing(parse_iso_date(week_start)?);
    }

    match args.format {
        OutputFormat::Json => print_json(&preview)?,
        OutputFormat::Table => print_preview_table(&preview),
    }
    Ok(())
}

fn run_import(args: ImportArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .map_err(|e| Error::io(format!("Failed to read {}", args.file.display()), e))?;

    let options = ImportOptions {
        workspace: args.workspace,
        week_format: args.week_format,
        fallback_week_start: match &args.week_start {
            Some(s) => Some(parse_iso_date(s)?),
            None => None,
        },
        source: args.source,
        policy: args.policy,
        file_name: args
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
    };

    let parser = CsvParser::new(&options);
    let mut preview = parser.parse(&bytes);
    if let Some(week_start) = options.fallback_week_start {
        preview.apply_week_start_to_missing(week_start);
    }

    let store = SqliteFactStore::open(&args.db_path)?;
    let outcome = Importer::new(&store).import(&preview.included, &options)?;

    println!(
        "{} created {} | skipped {} | updated {} | excluded rows {}",
        "Imported!".green().bold(),
        outcome.created,
        outcome.skipped,
        outcome.updated,
        preview.excluded.len()
    );
    for warning in &preview.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
    Ok(())
}

fn run_artists(args: ArtistsArgs) -> Result<()> {
    let store = SqliteFactStore::open(&args.db_path)?;
    let artists = store.artists_in_workspace(&args.workspace)?;
    let facts = store.facts_for_workspace(&args.workspace)?;

    let config = AnalyticsConfig {
        source_filter: args.source.map(|s| s.to_lowercase()),
        ..Default::default()
    };
    config.validate()?;

    let mut aggregates = compute_weekly_aggregates(&artists, &facts, &config);
    aggregates.sort_by(|a, b| b.total_streams.cmp(&a.total_streams));

    match args.format {
        OutputFormat::Json => print_json(&aggregates)?,
        OutputFormat::Table => {
            println!(
                "{:<28} {:>14} {:>12} {:>12} {:>9}",
                "ARTIST", "TOTAL", "THIS WEEK", "PREV WEEK", "GROWTH"
            );
            for agg in &aggregates {
                let growth = match agg.growth_display() {
                    Some(g) if g >= 0.0 => format!("+{g:.1}%").green().to_string(),
                    Some(g) => format!("{g:.1}%").red().to_string(),
                    None => "—".dimmed().to_string(),
                };
                let mut flags = String::new();
                if agg.rising {
                    flags.push_str(" rising");
                }
                if agg.mixed_sources {
                    flags.push_str(" mixed-sources");
                }
                println!(
                    "{:<28} {:>14} {:>12} {:>12} {:>9}{}",
                    agg.name, agg.total_streams, agg.this_week, agg.prev_week, growth, flags
                );
            }
        }
    }
    Ok(())
}

fn run_outliers(args: OutliersArgs) -> Result<()> {
    let store = SqliteFactStore::open(&args.db_path)?;
    let artists = store.artists_in_workspace(&args.workspace)?;

    let config = AnalyticsConfig {
        outlier_window: args.window,
        max_outliers: args.limit,
        ..Default::default()
    };
    config.validate()?;

    let mut candidates = Vec::new();
    for artist in &artists {
        candidates.push((artist.id, store.artist_series(artist.id)?));
    }
    let ranked = rank_outliers(candidates, &config);
    let name_of = |id: i64| {
        artists
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    };

    match args.format {
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> = ranked
                .iter()
                .map(|score| {
                    serde_json::json!({
                        "artist": name_of(score.artist_id),
                        "artistId": score.artist_id,
                        "latestWeek": score.latest_week,
                        "streams": score.streams,
                        "wowChange": score.wow_change,
                        "pctChange": score.pct_change,
                        "zScore": score.z_score,
                    })
                })
                .collect();
            print_json(&items)?;
        }
        OutputFormat::Table => {
            println!(
                "{:<28} {:>12} {:>12} {:>10} {:>8} {:>8}",
                "ARTIST", "WEEK", "STREAMS", "WOW", "PCT", "Z"
            );
            for score in &ranked {
                println!(
                    "{:<28} {:>12} {:>12} {:>10} {:>7.0}% {:>8.2}",
                    name_of(score.artist_id),
                    score.latest_week.format("%Y-%m-%d"),
                    score.streams,
                    score.wow_change,
                    score.pct_change * 100.0,
                    score.z_score
                );
            }
        }
    }
    Ok(())
}

fn run_watchlist(args: WatchlistArgs) -> Result<()> {
    let store = SqliteFactStore::open(&args.db_path)?;
    let starred = store.starred_artists(&args.user)?;
    if starred.is_empty() {
        println!("Watchlist is empty.");
        return Ok(());
    }

    let mut artists: Vec<Artist> = Vec::new();
    for artist_id in &starred {
        if let Some(artist) = store.artist(*artist_id)? {
            artists.push(artist);
        }
    }
    let facts = store.facts_for_artists(&starred)?;
    let config = AnalyticsConfig::default();
    let aggregates = compute_weekly_aggregates(&artists, &facts, &config);

    match args.format {
        OutputFormat::Json => print_json(&aggregates)?,
        OutputFormat::Table => {
            println!(
                "{:<28} {:>14} {:>12} {:>9}",
                "ARTIST", "TOTAL", "THIS WEEK", "GROWTH"
            );
            for agg in &aggregates {
                let growth = match agg.growth_display() {
                    Some(g) => format!("{g:+.1}%"),
                    None => "—".to_string(),
                };
                println!(
                    "{:<28} {:>14} {:>12} {:>9}",
                    agg.name, agg.total_streams, agg.this_week, growth
                );
            }
        }
    }
    Ok(())
}

fn run_star(args: StarArgs) -> Result<()> {
    let store = SqliteFactStore::open(&args.db_path)?;
    let artists = store.artists_in_workspace(&args.workspace)?;
    let wanted = args.artist.to_lowercase();
    let artist = artists
        .iter()
        .find(|a| a.name.to_lowercase() == wanted)
        .ok_or_else(|| {
            Error::configuration(format!(
                "No artist named '{}' in workspace '{}'",
                args.artist, args.workspace
            ))
        })?;

    let starred = store.set_star(&args.user, artist.id, !args.remove)?;
    if starred {
        println!("{} {}", "Starred".green(), artist.name);
    } else {
        println!("{} {}", "Unstarred".yellow(), artist.name);
    }
    Ok(())
}

fn run_uploads(args: UploadsArgs) -> Result<()> {
    let store = SqliteFactStore::open(&args.db_path)?;
    let uploads = store.uploads(&args.workspace)?;

    println!("{:<6} {:<28} {:<10} {}", "ID", "FILE", "SOURCE", "IMPORTED AT");
    for upload in &uploads {
        println!(
            "{:<6} {:<28} {:<10} {}",
            upload.id,
            upload.file_name.as_deref().unwrap_or("—"),
            upload.source,
            upload.imported_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

fn run_delete_upload(args: DeleteUploadArgs) -> Result<()> {
    let store = SqliteFactStore::open(&args.db_path)?;
    let deleted = store.delete_upload(args.upload_id)?;
    println!(
        "{} upload {} and {} fact(s)",
        "Deleted".green(),
        args.upload_id,
        deleted
    );
    Ok(())
}

fn print_preview_table(preview: &ParsePreview) {
    println!(
        "{:<28} {:>12} {:>12}",
        "ARTIST", "STREAMS", "WEEK"
    );
    for row in &preview.included {
        println!(
            "{:<28} {:>12} {:>12}",
            row.artist,
            row.streams,
            row.week_iso().unwrap_or_else(|| "—".to_string())
        );
    }
    println!(
        "\nRows: {} total · {} included · {} excluded",
        preview.stats.total_rows, preview.stats.included, preview.stats.excluded
    );
    for warning in &preview.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| Error::configuration(format!("Failed to render JSON: {e}")))?;
    println!("{rendered}");
    Ok(())
}

fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        Error::date_parse(
            format!("'{value}' is not an ISO date (expected yyyy-MM-dd)"),
            Some(e),
        )
    })
}
