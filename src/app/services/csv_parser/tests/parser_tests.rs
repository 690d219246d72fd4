use chrono::NaiveDate;

use crate::app::services::csv_parser::CsvParser;
use crate::config::ImportOptions;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn parser() -> CsvParser {
    CsvParser::new(&ImportOptions::default())
}

#[test]
fn parses_a_plain_export() {
    let preview = parser().parse(b"Artist,Streams,Week\nDrake,100,2025-01-06\nSZA,50,2025-01-06\n");
    assert_eq!(preview.included.len(), 2);
    assert_eq!(preview.excluded.len(), 0);
    assert_eq!(preview.included[0].artist, "Drake");
    assert_eq!(preview.included[0].streams, 100);
    assert_eq!(preview.included[0].week, Some(date(2025, 1, 6)));
    assert_eq!(preview.stats.total_rows, 2);
    assert!((preview.stats.inclusion_rate() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn parses_a_vendor_export_with_banner_and_footer() {
    let raw = b"Favorite Artists,,,\n\
        Artist Name,On-Demand Audio Streams,Week\n\
        Drake,\"1,234,567\",01/06/2025\n\
        Copyright (c) Vendor Inc. All rights reserved.\n";
    let preview = parser().parse(raw);

    assert_eq!(preview.included.len(), 1);
    assert_eq!(preview.excluded.len(), 0);
    let row = &preview.included[0];
    assert_eq!(row.artist, "Drake");
    assert_eq!(row.streams, 1_234_567);
    assert_eq!(row.week, Some(date(2025, 1, 6)));
    assert_eq!(preview.header_mapping.artist_key.as_deref(), Some("Artist Name"));
}

#[test]
fn detects_tab_delimited_files() {
    let preview = parser().parse(b"Artist\tStreams\tWeek\nDrake\t100\t2025-01-06\n");
    assert_eq!(preview.included.len(), 1);
    assert_eq!(preview.included[0].streams, 100);
}

#[test]
fn missing_week_cell_keeps_the_row_included() {
    let mut preview = parser().parse(b"Artist,Streams,Week\nDrake,100,\n");
    assert_eq!(preview.included.len(), 1);
    assert_eq!(preview.included[0].week, None);
    assert_eq!(preview.rows_missing_week(), 1);

    preview.apply_week_start_to_missing(date(2025, 1, 6));
    assert_eq!(preview.included[0].week, Some(date(2025, 1, 6)));
    assert_eq!(preview.rows_missing_week(), 0);
}

#[test]
fn rows_missing_artist_or_streams_are_excluded_with_reasons() {
    let preview = parser().parse(b"Artist,Streams,Week\n,100,2025-01-06\nDrake,n/a,2025-01-06\n");
    assert_eq!(preview.included.len(), 0);
    assert_eq!(preview.excluded.len(), 2);
    assert_eq!(preview.excluded[0].missing, vec!["artist"]);
    assert_eq!(preview.excluded[1].missing, vec!["streams"]);
    assert!(preview
        .warnings
        .iter()
        .any(|w| w.contains("Skipped row missing: streams")));
    assert_eq!(preview.stats.excluded, 2);
}

#[test]
fn blank_lines_are_ignored_not_counted() {
    let preview = parser().parse(b"Artist,Streams,Week\nDrake,100,2025-01-06\n,,\n");
    assert_eq!(preview.stats.total_rows, 1);
    assert_eq!(preview.excluded.len(), 0);
}

#[test]
fn empty_file_yields_a_warning_and_no_rows() {
    let preview = parser().parse(b"");
    assert!(preview.included.is_empty());
    assert!(preview
        .warnings
        .iter()
        .any(|w| w.contains("no header or data rows")));
}

#[test]
fn unmapped_headers_warn_and_exclude_every_row() {
    let preview = parser().parse(b"alpha,beta,gamma\n1,2,3\n");
    assert_eq!(preview.included.len(), 0);
    assert_eq!(preview.excluded.len(), 1);
    assert!(preview.header_mapping.artist_key.is_none());
    assert!(preview
        .warnings
        .iter()
        .any(|w| w.contains("Artist column")));
}

#[test]
fn day_first_week_format_option_is_honored() {
    let options = ImportOptions {
        week_format: Some("dd/MM/yyyy".to_string()),
        ..ImportOptions::default()
    };
    let preview = CsvParser::new(&options).parse(b"Artist,Streams,Week\nDrake,100,06/01/2025\n");
    assert_eq!(preview.included[0].week, Some(date(2025, 1, 6)));
}

#[test]
fn invalid_utf8_degrades_instead_of_failing() {
    let mut raw = b"Artist,Streams,Week\nDr".to_vec();
    raw.push(0xff);
    raw.extend_from_slice(b"ke,100,2025-01-06\n");
    let preview = parser().parse(&raw);
    assert_eq!(preview.included.len(), 1);
    assert_eq!(preview.included[0].streams, 100);
}
