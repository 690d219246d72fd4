//! Z-score outlier detection for notable week-over-week movers
//!
//! Scores the most recent week-over-week change against a rolling window
//! of the artist's own prior changes. The threshold adapts per artist:
//! different artists have wildly different baseline volatility, so a
//! global cutoff would either drown small artists or ignore large ones.

use chrono::NaiveDate;
use tracing::debug;

use crate::app::models::OutlierScore;
use crate::config::AnalyticsConfig;

/// Score an artist's latest week-over-week change.
///
/// `series` is the full (week, streams) history ascending by week. Returns
/// `None` when the history is shorter than the configured minimum; such
/// artists are excluded from ranking entirely rather than zero-scored.
pub fn score_artist(
    artist_id: i64,
    series: &[(NaiveDate, i64)],
    config: &AnalyticsConfig,
) -> Option<OutlierScore> {
    if series.len() < config.min_history_weeks {
        return None;
    }

    let changes: Vec<i64> = series.windows(2).map(|w| w[1].1 - w[0].1).collect();
    let last_change = *changes.last()?;

    // Historical window: up to `outlier_window` deltas preceding the latest
    let history = &changes[..changes.len() - 1];
    let window_start = history.len().saturating_sub(config.outlier_window);
    let window = &history[window_start..];

    let mean = window.iter().sum::<i64>() as f64 / window.len() as f64;
    let variance = window
        .iter()
        .map(|&c| {
            let d = c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / window.len() as f64;
    let std_dev = variance.sqrt();

    let z_score = if std_dev > 0.0 {
        (last_change as f64 - mean) / std_dev
    } else {
        0.0
    };

    let (latest_week, latest_streams) = *series.last()?;
    let prev_streams = series[series.len() - 2].1;
    let pct_change = if prev_streams > 0 {
        last_change as f64 / prev_streams as f64
    } else {
        0.0
    };

    Some(OutlierScore {
        artist_id,
        latest_week,
        streams: latest_streams,
        wow_change: last_change,
        pct_change,
        z_score,
    })
}

/// Rank outlier candidates across artists.
///
/// Candidates with non-positive latest-week stream counts are dropped,
/// the rest sort descending by z-score (ties by artist id for
/// determinism), and the list is capped at `config.max_outliers`.
pub fn rank_outliers(
    candidates: Vec<(i64, Vec<(NaiveDate, i64)>)>,
    config: &AnalyticsConfig,
) -> Vec<OutlierScore> {
    let mut scored: Vec<OutlierScore> = candidates
        .iter()
        .filter_map(|(artist_id, series)| score_artist(*artist_id, series, config))
        .filter(|score| score.streams > 0)
        .collect();

    scored.sort_by(|a, b| {
        b.z_score
            .partial_cmp(&a.z_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.artist_id.cmp(&b.artist_id))
    });
    scored.truncate(config.max_outliers);

    debug!("Ranked {} outlier candidates", scored.len());
    scored
}
