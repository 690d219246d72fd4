use chrono::{Days, NaiveDate};

use crate::app::services::analytics::{rank_outliers, score_artist};
use crate::config::AnalyticsConfig;

fn series(start: NaiveDate, streams: &[i64]) -> Vec<(NaiveDate, i64)> {
    streams
        .iter()
        .enumerate()
        .map(|(i, &s)| (start.checked_add_days(Days::new(7 * i as u64)).unwrap(), s))
        .collect()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

#[test]
fn scores_a_spike_against_prior_volatility() {
    // Changes: [50, -10, 20, 1940]. Window mean 20, population sd ~24.49.
    let history = series(monday(), &[1000, 1050, 1040, 1060, 3000]);
    let score = score_artist(1, &history, &AnalyticsConfig::default()).unwrap();

    assert_eq!(score.wow_change, 1940);
    assert_eq!(score.streams, 3000);
    assert!((score.z_score - 78.38).abs() < 0.01);
    assert!((score.pct_change - 1940.0 / 1060.0).abs() < 1e-9);
    assert_eq!(
        score.latest_week,
        monday().checked_add_days(Days::new(28)).unwrap()
    );
}

#[test]
fn short_histories_are_excluded() {
    let config = AnalyticsConfig::default();
    assert!(score_artist(1, &series(monday(), &[100, 200]), &config).is_none());
    assert!(score_artist(1, &series(monday(), &[100, 200, 300]), &config).is_some());
}

#[test]
fn flat_history_scores_zero() {
    let history = series(monday(), &[100, 100, 100, 100]);
    let score = score_artist(1, &history, &AnalyticsConfig::default()).unwrap();
    assert_eq!(score.wow_change, 0);
    assert_eq!(score.z_score, 0.0);
}

#[test]
fn window_caps_how_much_history_counts() {
    // Changes: [50, 10, 10, 10, 120]. With a window of 4 the early 50
    // contributes; with a window of 2 the history is flat and z collapses.
    let history = series(monday(), &[0, 50, 60, 70, 80, 200]);

    let wide = AnalyticsConfig {
        outlier_window: 4,
        ..AnalyticsConfig::default()
    };
    let score = score_artist(1, &history, &wide).unwrap();
    // mean 20, population sd sqrt(300)
    assert!((score.z_score - 100.0 / 300.0_f64.sqrt()).abs() < 1e-9);

    let narrow = AnalyticsConfig {
        outlier_window: 2,
        ..AnalyticsConfig::default()
    };
    let score = score_artist(1, &history, &narrow).unwrap();
    assert_eq!(score.z_score, 0.0);
}

#[test]
fn zero_previous_week_yields_zero_pct_change() {
    let history = series(monday(), &[500, 0, 300]);
    let score = score_artist(1, &history, &AnalyticsConfig::default()).unwrap();
    assert_eq!(score.wow_change, 300);
    assert_eq!(score.pct_change, 0.0);
}

#[test]
fn ranking_sorts_by_z_score_and_caps_the_list() {
    let candidates = vec![
        (1, series(monday(), &[100, 105, 110, 115, 120])), // steady
        (2, series(monday(), &[100, 105, 95, 100, 900])),  // big spike
        (3, series(monday(), &[100, 110, 90, 105, 300])),  // smaller spike
    ];

    let ranked = rank_outliers(candidates.clone(), &AnalyticsConfig::default());
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].artist_id, 2);
    assert_eq!(ranked[1].artist_id, 3);
    assert!(ranked[0].z_score > ranked[1].z_score);

    let capped = AnalyticsConfig {
        max_outliers: 1,
        ..AnalyticsConfig::default()
    };
    let ranked = rank_outliers(candidates, &capped);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].artist_id, 2);
}

#[test]
fn artists_with_no_current_streams_are_dropped_from_ranking() {
    let candidates = vec![(1, series(monday(), &[500, 400, 300, 0]))];
    let ranked = rank_outliers(candidates, &AnalyticsConfig::default());
    assert!(ranked.is_empty());
}

#[test]
fn ranking_of_too_short_histories_is_empty() {
    let candidates = vec![(1, series(monday(), &[100, 900]))];
    let ranked = rank_outliers(candidates, &AnalyticsConfig::default());
    assert!(ranked.is_empty());
}
