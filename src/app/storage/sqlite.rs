//! SQLite-backed fact store implementation

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::schema::SCHEMA;
use super::FactStore;
use crate::app::models::{Artist, ConflictPolicy, InsertOutcome, StreamFact, Upload};
use crate::{Error, Result};

/// SQLite-backed fact store.
///
/// A single connection behind a mutex; imports and reads are
/// single-request synchronous operations so connection pooling buys
/// nothing here.
pub struct SqliteFactStore {
    conn: Mutex<Connection>,
}

impl SqliteFactStore {
    /// Open (and initialize if needed) a store at the given path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())
            .map_err(|e| Error::storage("Failed to open database", Some(e)))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| Error::storage("Failed to set WAL mode", Some(e)))?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store, mainly for tests and one-off previews
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::storage("Failed to open in-memory database", Some(e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Self::create_schema_if_needed(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn create_schema_if_needed(conn: &Connection) -> Result<()> {
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )?;
        if table_count == 0 {
            info!("Creating fact store schema");
            conn.execute_batch(SCHEMA)?;
        }
        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("fact store connection mutex poisoned")
    }
}

impl FactStore for SqliteFactStore {
    fn upsert_artist(&self, workspace: &str, name: &str) -> Result<Artist> {
        let conn = self.conn();
        conn.execute(
            "INSERT OR IGNORE INTO artists (workspace, name) VALUES (?1, ?2)",
            params![workspace, name],
        )?;
        let artist = conn.query_row(
            "SELECT id, workspace, name FROM artists WHERE workspace = ?1 AND name = ?2",
            params![workspace, name],
            |row| {
                Ok(Artist {
                    id: row.get(0)?,
                    workspace: row.get(1)?,
                    name: row.get(2)?,
                })
            },
        )?;
        Ok(artist)
    }

    fn artist(&self, artist_id: i64) -> Result<Option<Artist>> {
        let conn = self.conn();
        let artist = conn
            .query_row(
                "SELECT id, workspace, name FROM artists WHERE id = ?1",
                params![artist_id],
                |row| {
                    Ok(Artist {
                        id: row.get(0)?,
                        workspace: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(artist)
    }

    fn artists_in_workspace(&self, workspace: &str) -> Result<Vec<Artist>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, workspace, name FROM artists WHERE workspace = ?1 ORDER BY name",
        )?;
        let artists = stmt
            .query_map(params![workspace], |row| {
                Ok(Artist {
                    id: row.get(0)?,
                    workspace: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    fn register_upload(
        &self,
        workspace: &str,
        file_name: Option<&str>,
        source: &str,
    ) -> Result<Upload> {
        let imported_at = Utc::now();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO uploads (workspace, file_name, source, imported_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![workspace, file_name, source, imported_at],
        )?;
        Ok(Upload {
            id: conn.last_insert_rowid(),
            workspace: workspace.to_string(),
            file_name: file_name.map(|s| s.to_string()),
            source: source.to_string(),
            imported_at,
        })
    }

    fn uploads(&self, workspace: &str) -> Result<Vec<Upload>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, workspace, file_name, source, imported_at
             FROM uploads WHERE workspace = ?1 ORDER BY imported_at DESC, id DESC",
        )?;
        let uploads = stmt
            .query_map(params![workspace], |row| {
                Ok(Upload {
                    id: row.get(0)?,
                    workspace: row.get(1)?,
                    file_name: row.get(2)?,
                    source: row.get(3)?,
                    imported_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(uploads)
    }

    fn insert_fact(&self, fact: &StreamFact, policy: ConflictPolicy) -> Result<InsertOutcome> {
        let conn = self.conn();
        match policy {
            ConflictPolicy::Skip => {
                // The uniqueness constraint serializes concurrent imports of
                // the same key; zero affected rows means it was already there
                let affected = conn.execute(
                    "INSERT OR IGNORE INTO stream_facts
                         (artist_id, week_start, source, streams, upload_id)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        fact.artist_id,
                        fact.week_start,
                        fact.source,
                        fact.streams,
                        fact.upload_id
                    ],
                )?;
                if affected == 1 {
                    Ok(InsertOutcome::Created)
                } else {
                    Ok(InsertOutcome::SkippedConflict)
                }
            }
            ConflictPolicy::Overwrite => {
                let inserted = conn.execute(
                    "INSERT INTO stream_facts
                         (artist_id, week_start, source, streams, upload_id)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        fact.artist_id,
                        fact.week_start,
                        fact.source,
                        fact.streams,
                        fact.upload_id
                    ],
                );
                match inserted {
                    Ok(_) => Ok(InsertOutcome::Created),
                    // Only a UNIQUE violation on (artist_id, week_start, source)
                    // means "row already exists"; CHECK and FK violations must
                    // propagate as storage errors
                    Err(rusqlite::Error::SqliteFailure(e, _))
                        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
                    {
                        conn.execute(
                            "UPDATE stream_facts
                             SET streams = ?4, upload_id = ?5
                             WHERE artist_id = ?1 AND week_start = ?2 AND source = ?3",
                            params![
                                fact.artist_id,
                                fact.week_start,
                                fact.source,
                                fact.streams,
                                fact.upload_id
                            ],
                        )?;
                        Ok(InsertOutcome::Updated)
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    fn facts_for_workspace(&self, workspace: &str) -> Result<Vec<StreamFact>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT f.artist_id, f.week_start, f.source, f.streams, f.upload_id
             FROM stream_facts f
             JOIN artists a ON a.id = f.artist_id
             WHERE a.workspace = ?1
             ORDER BY f.week_start, f.artist_id",
        )?;
        let facts = stmt
            .query_map(params![workspace], fact_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(facts)
    }

    fn facts_for_artists(&self, artist_ids: &[i64]) -> Result<Vec<StreamFact>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT artist_id, week_start, source, streams, upload_id
             FROM stream_facts WHERE artist_id = ?1
             ORDER BY week_start",
        )?;
        let mut facts = Vec::new();
        for artist_id in artist_ids {
            let rows = stmt
                .query_map(params![artist_id], fact_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            facts.extend(rows);
        }
        Ok(facts)
    }

    fn artist_series(&self, artist_id: i64) -> Result<Vec<(NaiveDate, i64)>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT week_start, SUM(streams) FROM stream_facts
             WHERE artist_id = ?1 GROUP BY week_start ORDER BY week_start",
        )?;
        let series = stmt
            .query_map(params![artist_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(series)
    }

    fn delete_upload(&self, upload_id: i64) -> Result<usize> {
        let conn = self.conn();
        let exists: Option<i64> = conn
            .query_row(
                "SELECT id FROM uploads WHERE id = ?1",
                params![upload_id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(Error::upload_not_found(upload_id));
        }

        let deleted = conn.execute(
            "DELETE FROM stream_facts WHERE upload_id = ?1",
            params![upload_id],
        )?;
        conn.execute("DELETE FROM uploads WHERE id = ?1", params![upload_id])?;
        Ok(deleted)
    }

    fn count_facts(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM stream_facts", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    fn set_star(&self, user: &str, artist_id: i64, starred: bool) -> Result<bool> {
        let conn = self.conn();
        if starred {
            conn.execute(
                "INSERT OR IGNORE INTO watchlist (user, artist_id, starred_at)
                 VALUES (?1, ?2, ?3)",
                params![user, artist_id, Utc::now()],
            )?;
        } else {
            conn.execute(
                "DELETE FROM watchlist WHERE user = ?1 AND artist_id = ?2",
                params![user, artist_id],
            )?;
        }
        Ok(starred)
    }

    fn starred_artists(&self, user: &str) -> Result<Vec<i64>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT artist_id FROM watchlist WHERE user = ?1
             ORDER BY starred_at DESC, rowid DESC",
        )?;
        let ids = stmt
            .query_map(params![user], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

fn fact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StreamFact> {
    Ok(StreamFact {
        artist_id: row.get(0)?,
        week_start: row.get(1)?,
        source: row.get(2)?,
        streams: row.get(3)?,
        upload_id: row.get(4)?,
    })
}
