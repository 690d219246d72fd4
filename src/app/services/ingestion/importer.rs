//! Commit orchestration for approved preview rows
//!
//! The importer is handed an explicit store rather than reaching for a
//! process-wide client, so tests run against the in-memory fake and the
//! CLI passes the SQLite store.

use std::collections::HashMap;

use tracing::{debug, info};

use super::stats::ImportOutcome;
use crate::app::models::{InsertOutcome, NormalizedRow, StreamFact};
use crate::app::storage::FactStore;
use crate::config::ImportOptions;
use crate::{Error, Result};

/// Imports normalized rows into a [`FactStore`]
pub struct Importer<'a, S: FactStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: FactStore + ?Sized> Importer<'a, S> {
    /// Create an importer over a store handle
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Commit rows as stream facts.
    ///
    /// Refuses outright when any row still lacks a week value; the caller
    /// must apply a fallback week start first. Otherwise each row upserts
    /// its artist and inserts one fact under the configured conflict
    /// policy, and uniqueness conflicts count as skips or updates.
    pub fn import(&self, rows: &[NormalizedRow], options: &ImportOptions) -> Result<ImportOutcome> {
        options.validate()?;

        let missing_week = rows.iter().filter(|r| r.week.is_none()).count();
        if missing_week > 0 {
            return Err(Error::missing_week(missing_week));
        }
        if rows.is_empty() {
            return Err(Error::configuration("no rows to import"));
        }

        let upload = self.store.register_upload(
            &options.workspace,
            options.file_name.as_deref(),
            &options.source,
        )?;
        debug!(upload_id = upload.id, "Registered upload");

        let source = options.source.trim().to_lowercase();
        let mut outcome = ImportOutcome::default();
        let mut artist_ids: HashMap<String, i64> = HashMap::new();

        for row in rows {
            let cache_key = row.artist.to_lowercase();
            let artist_id = match artist_ids.get(&cache_key) {
                Some(id) => *id,
                None => {
                    let artist = self.store.upsert_artist(&options.workspace, &row.artist)?;
                    artist_ids.insert(cache_key, artist.id);
                    artist.id
                }
            };

            let week = row.week.ok_or_else(|| Error::missing_week(1))?;
            let fact = StreamFact::new(artist_id, week, source.clone(), row.streams, Some(upload.id));

            match self.store.insert_fact(&fact, options.policy)? {
                InsertOutcome::Created => outcome.created += 1,
                InsertOutcome::SkippedConflict => outcome.skipped += 1,
                InsertOutcome::Updated => outcome.updated += 1,
            }
        }

        info!(
            workspace = %options.workspace,
            upload_id = upload.id,
            "Import finished: {}",
            outcome.summary()
        );
        Ok(outcome)
    }

    /// Delete a committed upload and every fact it created.
    ///
    /// Returns the number of facts removed.
    pub fn delete_upload(&self, upload_id: i64) -> Result<usize> {
        let deleted = self.store.delete_upload(upload_id)?;
        info!(upload_id, deleted, "Deleted upload");
        Ok(deleted)
    }
}
