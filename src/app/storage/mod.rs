//! Repository-style storage boundary for stream facts
//!
//! The computation core never talks SQL directly: it goes through the
//! [`FactStore`] trait, which the CLI backs with SQLite and the tests back
//! with an in-memory fake. The store's uniqueness constraint on
//! (artist_id, week_start, source) is what serializes concurrent imports
//! of overlapping weeks; the ingestion layer treats a conflict as an
//! expected skip/update outcome.

pub mod memory;
pub mod schema;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

pub use memory::InMemoryFactStore;
pub use sqlite::SqliteFactStore;

use chrono::NaiveDate;

use crate::app::models::{Artist, ConflictPolicy, InsertOutcome, StreamFact, Upload};
use crate::Result;

/// Storage operations for artists, uploads, facts and watchlists
pub trait FactStore: Send + Sync {
    /// Get or create the artist with this (workspace, name) key
    fn upsert_artist(&self, workspace: &str, name: &str) -> Result<Artist>;

    /// Look up an artist by id
    fn artist(&self, artist_id: i64) -> Result<Option<Artist>>;

    /// All artists in a workspace, ordered by name
    fn artists_in_workspace(&self, workspace: &str) -> Result<Vec<Artist>>;

    /// Record a new import batch; facts created by the import carry its id
    fn register_upload(
        &self,
        workspace: &str,
        file_name: Option<&str>,
        source: &str,
    ) -> Result<Upload>;

    /// All uploads in a workspace, most recent first
    fn uploads(&self, workspace: &str) -> Result<Vec<Upload>>;

    /// Insert a fact under the given conflict policy.
    ///
    /// A uniqueness conflict on (artist_id, week_start, source) yields
    /// `SkippedConflict` or `Updated` depending on the policy; it is never
    /// an error.
    fn insert_fact(&self, fact: &StreamFact, policy: ConflictPolicy) -> Result<InsertOutcome>;

    /// Every fact belonging to artists of a workspace
    fn facts_for_workspace(&self, workspace: &str) -> Result<Vec<StreamFact>>;

    /// Every fact for an explicit artist-id list (watchlist scope)
    fn facts_for_artists(&self, artist_ids: &[i64]) -> Result<Vec<StreamFact>>;

    /// (week, streams) series for one artist, summed across sources,
    /// ascending by week
    fn artist_series(&self, artist_id: i64) -> Result<Vec<(NaiveDate, i64)>>;

    /// Delete an upload and cascade-delete every fact tagged with it.
    /// Returns the number of facts removed.
    fn delete_upload(&self, upload_id: i64) -> Result<usize>;

    /// Total number of stored facts
    fn count_facts(&self) -> Result<usize>;

    /// Star or unstar an artist on a user's watchlist; returns the
    /// resulting starred state
    fn set_star(&self, user: &str, artist_id: i64, starred: bool) -> Result<bool>;

    /// Artist ids on a user's watchlist, most recently starred first
    fn starred_artists(&self, user: &str) -> Result<Vec<i64>>;
}
