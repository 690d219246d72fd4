//! Derived analytics over stored stream facts
//!
//! Aggregates and outlier scores are computed on read, never stored:
//! every request recomputes from the current facts so deleted uploads and
//! fresh imports are reflected immediately.
//!
//! The module is organized into logical components:
//! - [`aggregation`] - Per-artist weekly sums and growth rates
//! - [`outliers`] - Z-score ranking of notable week-over-week movers

pub mod aggregation;
pub mod outliers;

#[cfg(test)]
pub mod tests;

// Re-export main functions for easy access
pub use aggregation::{compute_weekly_aggregates, growth_rate_pct, latest_two_weeks};
pub use outliers::{rank_outliers, score_artist};
