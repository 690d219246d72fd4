//! Tests for aggregation and outlier detection

pub mod aggregation_tests;
pub mod outliers_tests;
