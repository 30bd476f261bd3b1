//! The persistence seam: a string-keyed JSON document store.
//!
//! Backends are fallible but silent: a read of a missing or corrupt key
//! yields `None` and the caller applies its default; a failed write
//! returns `false` and the caller's in-memory state stays authoritative
//! for the rest of the session. Nothing here is async — all store
//! mutation happens on the single control thread that owns the stores.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use serde_json::Value;

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Fixed key names in the shared persisted key space. Each component owns
/// exactly one key, so no cross-component write races exist.
pub mod keys {
  pub const LANGUAGE:  &str = "halal_lang";
  pub const THEME:     &str = "halal_theme";
  pub const FAVORITES: &str = "halal_favorites";
  pub const HISTORY:   &str = "halal_history";
  pub const CACHE:     &str = "halal_cache";
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a key/value persistence backend.
///
/// Implementations degrade rather than fail: `get` answers `None` for a
/// missing or unreadable value, and `set`/`remove` report success as a
/// `bool`. Callers never see an error type through this seam.
pub trait KeyValueStore {
  /// Read the document at `key`; `None` if absent or unreadable.
  fn get(&self, key: &str) -> Option<Value>;

  /// Write the document at `key`. Returns `false` if the write was lost.
  fn set(&self, key: &str, value: &Value) -> bool;

  /// Delete the document at `key`. Returns `false` if the delete failed.
  fn remove(&self, key: &str) -> bool;
}

// ─── Typed helpers ───────────────────────────────────────────────────────────

/// Read and decode the document at `key`, falling back to `T::default()`
/// when the key is absent or does not decode.
pub fn load_or_default<T, P>(store: &P, key: &str) -> T
where
  T: serde::de::DeserializeOwned + Default,
  P: KeyValueStore + ?Sized,
{
  store
    .get(key)
    .and_then(|v| serde_json::from_value(v).ok())
    .unwrap_or_default()
}

/// Encode and write `value` at `key`, swallowing failure.
pub fn persist<T, P>(store: &P, key: &str, value: &T)
where
  T: serde::Serialize,
  P: KeyValueStore + ?Sized,
{
  if let Ok(doc) = serde_json::to_value(value) {
    store.set(key, &doc);
  }
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A process-local backend, used as the test fixture and for ephemeral
/// sessions where nothing should outlive the process.
///
/// Cloning is cheap — clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Option<Value> {
    self.entries.lock().ok()?.get(key).cloned()
  }

  fn set(&self, key: &str, value: &Value) -> bool {
    match self.entries.lock() {
      Ok(mut map) => {
        map.insert(key.to_owned(), value.clone());
        true
      }
      Err(_) => false,
    }
  }

  fn remove(&self, key: &str) -> bool {
    match self.entries.lock() {
      Ok(mut map) => {
        map.remove(key);
        true
      }
      Err(_) => false,
    }
  }
}
