//! Ingestion of normalized rows into the fact store
//!
//! Turns the rows a preview approved into durable stream facts: artists
//! are upserted per (workspace, name), each import is registered as an
//! upload, and facts are inserted under the caller's conflict policy.
//! Uniqueness conflicts are counted, never propagated.
//!
//! The module is organized into logical components:
//! - [`importer`] - Commit orchestration against a [`crate::app::storage::FactStore`]
//! - [`stats`] - Import outcome counters

pub mod importer;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use importer::Importer;
pub use stats::ImportOutcome;
