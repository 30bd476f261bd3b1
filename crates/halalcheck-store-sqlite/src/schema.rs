//! SQL schema for the key/value table.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,   -- JSON document
    updated_at TEXT NOT NULL    -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";
