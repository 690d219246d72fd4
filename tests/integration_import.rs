//! End-to-end import flow: raw vendor export bytes through parse, commit
//! and analytics against a real SQLite database file.

use chrono::NaiveDate;

use streamstats::app::services::analytics::{compute_weekly_aggregates, rank_outliers};
use streamstats::app::services::csv_parser::CsvParser;
use streamstats::app::services::ingestion::Importer;
use streamstats::app::storage::{FactStore, SqliteFactStore};
use streamstats::{AnalyticsConfig, ConflictPolicy, ImportOptions};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const VENDOR_EXPORT: &[u8] = b"Favorite Artists,,,\n\
Artist Name,On-Demand Audio Streams,Week\n\
Drake,\"1,234,567\",01/06/2025\n\
SZA,\"987,654\",01/06/2025\n\
Copyright (c) Vendor Inc. All rights reserved.\n";

#[test]
fn vendor_export_imports_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteFactStore::open(dir.path().join("streamstats.db")).unwrap();

    let options = ImportOptions {
        file_name: Some("favorite_artists.csv".to_string()),
        ..ImportOptions::default()
    };
    let preview = CsvParser::new(&options).parse(VENDOR_EXPORT);

    // Banner and footer lines appear in neither row set
    assert_eq!(preview.included.len(), 2);
    assert_eq!(preview.excluded.len(), 0);
    assert_eq!(preview.included[0].artist, "Drake");
    assert_eq!(preview.included[0].streams, 1_234_567);
    assert_eq!(preview.included[0].week, Some(date(2025, 1, 6)));

    let outcome = Importer::new(&store).import(&preview.included, &options).unwrap();
    assert_eq!(outcome.created, 2);

    // Re-importing the same file is a no-op under the default skip policy
    let second = Importer::new(&store).import(&preview.included, &options).unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(store.count_facts().unwrap(), 2);
}

#[test]
fn fallback_week_start_unblocks_dateless_files() {
    let store = SqliteFactStore::open_in_memory().unwrap();
    let options = ImportOptions::default();

    let mut preview =
        CsvParser::new(&options).parse(b"Artist,Streams\nDrake,100\nSZA,50\n");
    assert_eq!(preview.rows_missing_week(), 2);

    // Commit refuses while weeks are missing
    let err = Importer::new(&store)
        .import(&preview.included, &options)
        .unwrap_err();
    assert!(matches!(err, streamstats::Error::MissingWeek { rows: 2 }));

    preview.apply_week_start_to_missing(date(2025, 1, 6));
    let outcome = Importer::new(&store)
        .import(&preview.included, &options)
        .unwrap();
    assert_eq!(outcome.created, 2);
}

#[test]
fn analytics_read_back_from_the_store() {
    let store = SqliteFactStore::open_in_memory().unwrap();
    let importer = Importer::new(&store);
    let options = ImportOptions::default();

    // Five weekly exports for one artist, a steady baseline then a spike
    let weekly = [
        (date(2025, 1, 6), 1000),
        (date(2025, 1, 13), 1050),
        (date(2025, 1, 20), 1040),
        (date(2025, 1, 27), 1060),
        (date(2025, 2, 3), 3000),
    ];
    for (week, streams) in weekly {
        let rows = vec![streamstats::NormalizedRow {
            artist: "Drake".to_string(),
            streams,
            week: Some(week),
        }];
        importer.import(&rows, &options).unwrap();
    }

    let config = AnalyticsConfig::default();
    let artists = store.artists_in_workspace("default").unwrap();
    let facts = store.facts_for_workspace("default").unwrap();

    let aggregates = compute_weekly_aggregates(&artists, &facts, &config);
    assert_eq!(aggregates.len(), 1);
    let drake = &aggregates[0];
    assert_eq!(drake.total_streams, 7150);
    assert_eq!(drake.this_week, 3000);
    assert_eq!(drake.prev_week, 1060);
    assert!(drake.rising);

    let series = store.artist_series(drake.artist_id).unwrap();
    let ranked = rank_outliers(vec![(drake.artist_id, series)], &config);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].wow_change, 1940);
    assert!((ranked[0].z_score - 78.38).abs() < 0.01);
}

#[test]
fn overwrite_reimport_corrects_a_bad_week() {
    let store = SqliteFactStore::open_in_memory().unwrap();
    let importer = Importer::new(&store);
    let options = ImportOptions::default();

    let preview =
        CsvParser::new(&options).parse(b"Artist,Streams,Week\nDrake,999999,2025-01-06\n");
    importer.import(&preview.included, &options).unwrap();

    // Corrected export for the same week, re-imported with overwrite
    let corrected =
        CsvParser::new(&options).parse(b"Artist,Streams,Week\nDrake,100000,2025-01-06\n");
    let overwrite = ImportOptions {
        policy: ConflictPolicy::Overwrite,
        ..ImportOptions::default()
    };
    let outcome = importer.import(&corrected.included, &overwrite).unwrap();
    assert_eq!(outcome.updated, 1);

    let facts = store.facts_for_workspace("default").unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].streams, 100_000);
}
