//! Per-artist weekly aggregation and growth rates
//!
//! Given the facts for a scope (a workspace, or an explicit artist list
//! such as a watchlist), computes each artist's total streams, the sums at
//! the two most recent distinct weeks, and the week-over-week growth
//! percentage.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::app::models::{Artist, StreamFact, WeeklyAggregate};
use crate::config::AnalyticsConfig;

/// The two most recent distinct week values present in the facts,
/// descending: (latest, previous)
pub fn latest_two_weeks(facts: &[StreamFact]) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let weeks: BTreeSet<NaiveDate> = facts.iter().map(|f| f.week_start).collect();
    let mut recent = weeks.into_iter().rev();
    (recent.next(), recent.next())
}

/// Week-over-week growth percentage.
///
/// Undefined (`None`) when the previous week is zero or absent; callers
/// must render that as a neutral state, never as 0% or a spike.
pub fn growth_rate_pct(this_week: i64, prev_week: i64) -> Option<f64> {
    if prev_week > 0 {
        Some(((this_week - prev_week) as f64 / prev_week as f64) * 100.0)
    } else {
        None
    }
}

/// Compute per-artist weekly aggregates over the facts in scope.
///
/// When `config.source_filter` is set, sums are restricted to that source
/// tag. Without a filter, sums span every source and artists whose facts
/// mix source tags are flagged `mixed_sources` so callers never present
/// mixed-region totals as single-region data. Output is ordered by artist
/// id for determinism.
pub fn compute_weekly_aggregates(
    artists: &[Artist],
    facts: &[StreamFact],
    config: &AnalyticsConfig,
) -> Vec<WeeklyAggregate> {
    let scoped: Vec<&StreamFact> = match &config.source_filter {
        Some(source) => {
            let source = source.to_lowercase();
            facts.iter().filter(|f| f.source == source).collect()
        }
        None => facts.iter().collect(),
    };

    let weeks: BTreeSet<NaiveDate> = scoped.iter().map(|f| f.week_start).collect();
    let mut recent = weeks.into_iter().rev();
    let (latest, previous) = (recent.next(), recent.next());
    debug!(?latest, ?previous, "Aggregation week boundaries");

    let mut totals: HashMap<i64, i64> = HashMap::new();
    let mut this_week: HashMap<i64, i64> = HashMap::new();
    let mut prev_week: HashMap<i64, i64> = HashMap::new();
    let mut sources: HashMap<i64, HashSet<&str>> = HashMap::new();

    for fact in &scoped {
        *totals.entry(fact.artist_id).or_default() += fact.streams;
        if Some(fact.week_start) == latest {
            *this_week.entry(fact.artist_id).or_default() += fact.streams;
        }
        if Some(fact.week_start) == previous {
            *prev_week.entry(fact.artist_id).or_default() += fact.streams;
        }
        sources
            .entry(fact.artist_id)
            .or_default()
            .insert(fact.source.as_str());
    }

    let mut aggregates: Vec<WeeklyAggregate> = artists
        .iter()
        .map(|artist| {
            let this = this_week.get(&artist.id).copied().unwrap_or(0);
            let prev = prev_week.get(&artist.id).copied().unwrap_or(0);
            let growth = growth_rate_pct(this, prev);
            let mixed = config.source_filter.is_none()
                && sources.get(&artist.id).map_or(false, |s| s.len() > 1);

            WeeklyAggregate {
                artist_id: artist.id,
                name: artist.name.clone(),
                total_streams: totals.get(&artist.id).copied().unwrap_or(0),
                this_week: this,
                prev_week: prev,
                growth_rate_pct: growth,
                rising: growth.map_or(false, |g| g >= config.rising_threshold_pct),
                mixed_sources: mixed,
            }
        })
        .collect();

    aggregates.sort_by_key(|a| a.artist_id);
    aggregates
}
