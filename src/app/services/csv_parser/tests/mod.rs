//! Tests for CSV parser components

pub mod parser_tests;
pub mod row_cleaner_tests;
