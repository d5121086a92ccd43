//! SQL schema for the brewstat SQLite stores.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Raw document collections. Bodies are JSON objects stored as text, in the
/// order they were loaded.
pub const RECORDS_SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS documents (
    collection TEXT    NOT NULL,   -- 'beers' | 'breweries'
    position   INTEGER NOT NULL,   -- load order within the collection
    body       TEXT    NOT NULL,   -- JSON object
    PRIMARY KEY (collection, position)
);

PRAGMA user_version = 1;
";

/// Report cache. Rows are replaced whole; expired rows are ignored on read
/// and removed lazily.
pub const CACHE_SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS cache_entries (
    key        TEXT    PRIMARY KEY,
    blob       BLOB    NOT NULL,
    expires_at INTEGER NOT NULL    -- unix epoch milliseconds
);

PRAGMA user_version = 1;
";
