//! SQLite schema for the fact store
//!
//! The UNIQUE constraints carry real semantics: (workspace, name) makes
//! artist upserts idempotent, and (artist_id, week_start, source) makes
//! repeated imports of overlapping weeks conflict instead of duplicating.

/// Schema DDL applied to a fresh database
pub const SCHEMA: &str = "
CREATE TABLE artists (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    workspace   TEXT NOT NULL,
    name        TEXT NOT NULL,
    UNIQUE (workspace, name)
);

CREATE TABLE uploads (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    workspace   TEXT NOT NULL,
    file_name   TEXT,
    source      TEXT NOT NULL,
    imported_at TEXT NOT NULL
);

CREATE TABLE stream_facts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    artist_id   INTEGER NOT NULL REFERENCES artists (id),
    week_start  TEXT NOT NULL,
    source      TEXT NOT NULL,
    streams     INTEGER NOT NULL CHECK (streams >= 0),
    upload_id   INTEGER REFERENCES uploads (id),
    UNIQUE (artist_id, week_start, source)
);

CREATE INDEX idx_stream_facts_artist_week ON stream_facts (artist_id, week_start);
CREATE INDEX idx_stream_facts_upload ON stream_facts (upload_id);

CREATE TABLE watchlist (
    user       TEXT NOT NULL,
    artist_id  INTEGER NOT NULL REFERENCES artists (id),
    starred_at TEXT NOT NULL,
    UNIQUE (user, artist_id)
);
";
