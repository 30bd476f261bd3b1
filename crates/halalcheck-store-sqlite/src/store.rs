//! [`SqliteStore`] — the SQLite implementation of [`KeyValueStore`].

use std::{
  path::Path,
  sync::{Arc, Mutex},
};

use halalcheck_core::kv::KeyValueStore;
use rusqlite::{Connection, OptionalExtension as _, params};
use serde_json::Value;

use crate::{Result, schema::SCHEMA};

/// A key/value store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// operation takes the connection lock briefly; per-operation failures
/// are logged and reported through the trait's degrade-don't-fail
/// contract.
#[derive(Clone)]
pub struct SqliteStore {
  conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::init(Connection::open(path)?)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self {
      conn: Arc::new(Mutex::new(conn)),
    })
  }

  #[cfg(test)]
  pub(crate) fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> T) -> T {
    f(&self.conn.lock().expect("connection lock"))
  }
}

impl KeyValueStore for SqliteStore {
  fn get(&self, key: &str) -> Option<Value> {
    let conn = self.conn.lock().ok()?;
    let raw: Option<String> = conn
      .query_row(
        "SELECT value FROM kv WHERE key = ?1",
        params![key],
        |row| row.get(0),
      )
      .optional()
      .unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "kv read failed");
        None
      });

    match serde_json::from_str(&raw?) {
      Ok(value) => Some(value),
      Err(e) => {
        tracing::warn!(key, error = %e, "kv value did not parse; treating as absent");
        None
      }
    }
  }

  fn set(&self, key: &str, value: &Value) -> bool {
    let Ok(conn) = self.conn.lock() else {
      return false;
    };
    let result = conn.execute(
      "INSERT INTO kv (key, value, updated_at)
       VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
       ON CONFLICT(key) DO UPDATE
         SET value = excluded.value, updated_at = excluded.updated_at",
      params![key, value.to_string()],
    );
    match result {
      Ok(_) => true,
      Err(e) => {
        tracing::warn!(key, error = %e, "kv write failed");
        false
      }
    }
  }

  fn remove(&self, key: &str) -> bool {
    let Ok(conn) = self.conn.lock() else {
      return false;
    };
    match conn.execute("DELETE FROM kv WHERE key = ?1", params![key]) {
      Ok(_) => true,
      Err(e) => {
        tracing::warn!(key, error = %e, "kv delete failed");
        false
      }
    }
  }
}
