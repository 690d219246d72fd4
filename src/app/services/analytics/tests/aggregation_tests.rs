use chrono::NaiveDate;

use crate::app::models::{Artist, StreamFact};
use crate::app::services::analytics::{
    compute_weekly_aggregates, growth_rate_pct, latest_two_weeks,
};
use crate::config::AnalyticsConfig;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn artist(id: i64, name: &str) -> Artist {
    Artist {
        id,
        workspace: "default".to_string(),
        name: name.to_string(),
    }
}

fn fact(artist_id: i64, week: NaiveDate, source: &str, streams: i64) -> StreamFact {
    StreamFact::new(artist_id, week, source.to_string(), streams, None)
}

#[test]
fn latest_two_weeks_picks_distinct_weeks_descending() {
    let facts = vec![
        fact(1, date(2025, 1, 6), "us", 10),
        fact(2, date(2025, 1, 20), "us", 30),
        fact(1, date(2025, 1, 13), "us", 20),
        fact(2, date(2025, 1, 20), "global", 5),
    ];
    let (latest, previous) = latest_two_weeks(&facts);
    assert_eq!(latest, Some(date(2025, 1, 20)));
    assert_eq!(previous, Some(date(2025, 1, 13)));
}

#[test]
fn latest_two_weeks_handles_sparse_history() {
    assert_eq!(latest_two_weeks(&[]), (None, None));
    let one = vec![fact(1, date(2025, 1, 6), "us", 10)];
    assert_eq!(latest_two_weeks(&one), (Some(date(2025, 1, 6)), None));
}

#[test]
fn growth_rate_is_undefined_when_previous_week_is_zero() {
    assert_eq!(growth_rate_pct(100, 0), None);
    assert_eq!(growth_rate_pct(0, 0), None);
}

#[test]
fn growth_rate_basic_cases() {
    assert_eq!(growth_rate_pct(60, 40), Some(50.0));
    assert_eq!(growth_rate_pct(30, 40), Some(-25.0));
    assert_eq!(growth_rate_pct(0, 40), Some(-100.0));
}

#[test]
fn aggregates_sum_totals_and_boundary_weeks() {
    let artists = vec![artist(1, "Drake"), artist(2, "SZA")];
    let facts = vec![
        fact(1, date(2025, 1, 6), "us", 100),
        fact(1, date(2025, 1, 13), "us", 150),
        fact(2, date(2025, 1, 6), "us", 40),
        fact(2, date(2025, 1, 13), "us", 60),
    ];

    let aggregates = compute_weekly_aggregates(&artists, &facts, &AnalyticsConfig::default());
    assert_eq!(aggregates.len(), 2);

    let drake = &aggregates[0];
    assert_eq!(drake.artist_id, 1);
    assert_eq!(drake.total_streams, 250);
    assert_eq!(drake.this_week, 150);
    assert_eq!(drake.prev_week, 100);
    assert_eq!(drake.growth_rate_pct, Some(50.0));
    assert!(drake.rising);

    let sza = &aggregates[1];
    assert_eq!(sza.this_week, 60);
    assert_eq!(sza.growth_rate_pct, Some(50.0));
}

#[test]
fn new_artist_with_no_previous_week_has_undefined_growth() {
    let artists = vec![artist(1, "Drake"), artist(2, "Newcomer")];
    let facts = vec![
        fact(1, date(2025, 1, 6), "us", 100),
        fact(1, date(2025, 1, 13), "us", 110),
        // Newcomer only appears in the latest week
        fact(2, date(2025, 1, 13), "us", 9999),
    ];

    let aggregates = compute_weekly_aggregates(&artists, &facts, &AnalyticsConfig::default());
    let newcomer = &aggregates[1];
    assert_eq!(newcomer.prev_week, 0);
    assert_eq!(newcomer.growth_rate_pct, None);
    assert!(!newcomer.rising);
}

#[test]
fn mixed_source_artists_are_flagged_without_a_filter() {
    let artists = vec![artist(1, "Drake"), artist(2, "SZA")];
    let facts = vec![
        fact(1, date(2025, 1, 6), "us", 100),
        fact(1, date(2025, 1, 6), "global", 500),
        fact(2, date(2025, 1, 6), "us", 40),
    ];

    let aggregates = compute_weekly_aggregates(&artists, &facts, &AnalyticsConfig::default());
    assert!(aggregates[0].mixed_sources);
    assert_eq!(aggregates[0].total_streams, 600);
    assert!(!aggregates[1].mixed_sources);
}

#[test]
fn source_filter_restricts_sums_and_clears_mixed_flag() {
    let artists = vec![artist(1, "Drake")];
    let facts = vec![
        fact(1, date(2025, 1, 6), "us", 100),
        fact(1, date(2025, 1, 6), "global", 500),
        fact(1, date(2025, 1, 13), "us", 150),
    ];
    let config = AnalyticsConfig {
        source_filter: Some("US".to_string()),
        ..AnalyticsConfig::default()
    };

    let aggregates = compute_weekly_aggregates(&artists, &facts, &config);
    let drake = &aggregates[0];
    assert_eq!(drake.total_streams, 250);
    assert_eq!(drake.this_week, 150);
    assert_eq!(drake.prev_week, 100);
    assert!(!drake.mixed_sources);
}

#[test]
fn rising_flag_respects_the_threshold() {
    let artists = vec![artist(1, "Flat"), artist(2, "Spike")];
    let facts = vec![
        fact(1, date(2025, 1, 6), "us", 100),
        fact(1, date(2025, 1, 13), "us", 110),
        fact(2, date(2025, 1, 6), "us", 100),
        fact(2, date(2025, 1, 13), "us", 130),
    ];

    let aggregates = compute_weekly_aggregates(&artists, &facts, &AnalyticsConfig::default());
    assert!(!aggregates[0].rising); // +10% < 30%
    assert!(aggregates[1].rising); // +30% meets the threshold
}

#[test]
fn artists_without_facts_still_appear_with_zeros() {
    let artists = vec![artist(1, "Silent")];
    let aggregates = compute_weekly_aggregates(&artists, &[], &AnalyticsConfig::default());
    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].total_streams, 0);
    assert_eq!(aggregates[0].growth_rate_pct, None);
}
