//! In-memory fact store, the test double for [`super::FactStore`]
//!
//! Mirrors the SQLite store's semantics exactly: artist uniqueness per
//! (workspace, name), fact uniqueness per (artist_id, week_start, source),
//! streams clamped non-negative, cascade delete by upload id.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

use super::FactStore;
use crate::app::models::{Artist, ConflictPolicy, InsertOutcome, StreamFact, Upload};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct Inner {
    artists: Vec<Artist>,
    uploads: Vec<Upload>,
    // key: (artist_id, week_start, source); value: (streams, upload_id)
    facts: BTreeMap<(i64, NaiveDate, String), (i64, Option<i64>)>,
    // (user, artist_id, order counter)
    stars: Vec<(String, i64, u64)>,
    next_artist_id: i64,
    next_upload_id: i64,
    star_counter: u64,
}

/// BTreeMap-backed store used by unit tests and doc examples
#[derive(Debug, Default)]
pub struct InMemoryFactStore {
    inner: Mutex<Inner>,
}

impl InMemoryFactStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("fact store mutex poisoned")
    }
}

impl FactStore for InMemoryFactStore {
    fn upsert_artist(&self, workspace: &str, name: &str) -> Result<Artist> {
        let mut inner = self.lock();
        if let Some(artist) = inner
            .artists
            .iter()
            .find(|a| a.workspace == workspace && a.name == name)
        {
            return Ok(artist.clone());
        }
        inner.next_artist_id += 1;
        let artist = Artist {
            id: inner.next_artist_id,
            workspace: workspace.to_string(),
            name: name.to_string(),
        };
        inner.artists.push(artist.clone());
        Ok(artist)
    }

    fn artist(&self, artist_id: i64) -> Result<Option<Artist>> {
        let inner = self.lock();
        Ok(inner.artists.iter().find(|a| a.id == artist_id).cloned())
    }

    fn artists_in_workspace(&self, workspace: &str) -> Result<Vec<Artist>> {
        let inner = self.lock();
        let mut artists: Vec<Artist> = inner
            .artists
            .iter()
            .filter(|a| a.workspace == workspace)
            .cloned()
            .collect();
        artists.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(artists)
    }

    fn register_upload(
        &self,
        workspace: &str,
        file_name: Option<&str>,
        source: &str,
    ) -> Result<Upload> {
        let mut inner = self.lock();
        inner.next_upload_id += 1;
        let upload = Upload {
            id: inner.next_upload_id,
            workspace: workspace.to_string(),
            file_name: file_name.map(|s| s.to_string()),
            source: source.to_string(),
            imported_at: Utc::now(),
        };
        inner.uploads.push(upload.clone());
        Ok(upload)
    }

    fn uploads(&self, workspace: &str) -> Result<Vec<Upload>> {
        let inner = self.lock();
        let mut uploads: Vec<Upload> = inner
            .uploads
            .iter()
            .filter(|u| u.workspace == workspace)
            .cloned()
            .collect();
        uploads.reverse();
        Ok(uploads)
    }

    fn insert_fact(&self, fact: &StreamFact, policy: ConflictPolicy) -> Result<InsertOutcome> {
        let mut inner = self.lock();
        let key = (fact.artist_id, fact.week_start, fact.source.clone());
        let value = (fact.streams.max(0), fact.upload_id);

        if inner.facts.contains_key(&key) {
            match policy {
                ConflictPolicy::Skip => Ok(InsertOutcome::SkippedConflict),
                ConflictPolicy::Overwrite => {
                    inner.facts.insert(key, value);
                    Ok(InsertOutcome::Updated)
                }
            }
        } else {
            inner.facts.insert(key, value);
            Ok(InsertOutcome::Created)
        }
    }

    fn facts_for_workspace(&self, workspace: &str) -> Result<Vec<StreamFact>> {
        let inner = self.lock();
        let ids: Vec<i64> = inner
            .artists
            .iter()
            .filter(|a| a.workspace == workspace)
            .map(|a| a.id)
            .collect();
        Ok(collect_facts(&inner, |artist_id| ids.contains(&artist_id)))
    }

    fn facts_for_artists(&self, artist_ids: &[i64]) -> Result<Vec<StreamFact>> {
        let inner = self.lock();
        Ok(collect_facts(&inner, |artist_id| {
            artist_ids.contains(&artist_id)
        }))
    }

    fn artist_series(&self, artist_id: i64) -> Result<Vec<(NaiveDate, i64)>> {
        let inner = self.lock();
        let mut by_week: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for ((id, week, _source), (streams, _)) in &inner.facts {
            if *id == artist_id {
                *by_week.entry(*week).or_default() += streams;
            }
        }
        Ok(by_week.into_iter().collect())
    }

    fn delete_upload(&self, upload_id: i64) -> Result<usize> {
        let mut inner = self.lock();
        let position = inner
            .uploads
            .iter()
            .position(|u| u.id == upload_id)
            .ok_or_else(|| Error::upload_not_found(upload_id))?;
        inner.uploads.remove(position);

        let before = inner.facts.len();
        inner.facts.retain(|_, (_, upload)| *upload != Some(upload_id));
        Ok(before - inner.facts.len())
    }

    fn count_facts(&self) -> Result<usize> {
        Ok(self.lock().facts.len())
    }

    fn set_star(&self, user: &str, artist_id: i64, starred: bool) -> Result<bool> {
        let mut inner = self.lock();
        let existing = inner
            .stars
            .iter()
            .position(|(u, a, _)| u == user && *a == artist_id);
        match (starred, existing) {
            (true, None) => {
                inner.star_counter += 1;
                let order = inner.star_counter;
                inner.stars.push((user.to_string(), artist_id, order));
            }
            (false, Some(position)) => {
                inner.stars.remove(position);
            }
            _ => {}
        }
        Ok(starred)
    }

    fn starred_artists(&self, user: &str) -> Result<Vec<i64>> {
        let inner = self.lock();
        let mut stars: Vec<(u64, i64)> = inner
            .stars
            .iter()
            .filter(|(u, _, _)| u == user)
            .map(|(_, artist_id, order)| (*order, *artist_id))
            .collect();
        stars.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(stars.into_iter().map(|(_, id)| id).collect())
    }
}

fn collect_facts(inner: &Inner, mut in_scope: impl FnMut(i64) -> bool) -> Vec<StreamFact> {
    let mut facts: Vec<StreamFact> = inner
        .facts
        .iter()
        .filter(|((artist_id, _, _), _)| in_scope(*artist_id))
        .map(|((artist_id, week, source), (streams, upload_id))| StreamFact {
            artist_id: *artist_id,
            week_start: *week,
            source: source.clone(),
            streams: *streams,
            upload_id: *upload_id,
        })
        .collect();
    facts.sort_by_key(|f| (f.week_start, f.artist_id));
    facts
}
