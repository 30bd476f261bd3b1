//! Time-bounded product cache.
//!
//! One entry per identifier; a later `put` overwrites. Staleness is
//! evaluated lazily on read — nothing sweeps expired entries.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc, serde::ts_milliseconds};
use serde::{Deserialize, Serialize};

use crate::{
  kv::{self, KeyValueStore, keys},
  product::ProductInfo,
};

/// How long a fetched payload keeps being served from cache.
pub const CACHE_TTL_HOURS: i64 = 24;

/// A cached payload with its fetch stamp. The serialized names (`data`,
/// `timestamp`) match the persisted format of earlier releases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
  #[serde(rename = "data")]
  pub payload:    ProductInfo,
  #[serde(rename = "timestamp", with = "ts_milliseconds")]
  pub fetched_at: DateTime<Utc>,
}

/// The last-known payload per identifier, held in memory for the process
/// lifetime and mirrored to the backend on every write.
pub struct ProductCache<P> {
  entries: HashMap<String, CacheEntry>,
  store:   P,
}

impl<P: KeyValueStore> ProductCache<P> {
  /// Load the persisted map once; an unreadable document starts empty.
  pub fn new(store: P) -> Self {
    let entries = kv::load_or_default(&store, keys::CACHE);
    Self { entries, store }
  }

  /// The cached payload for `code`, if present and fetched within the
  /// freshness window. A stale entry is left in place and reported as a
  /// miss; refetching is the caller's responsibility.
  pub fn get(&self, code: &str) -> Option<&ProductInfo> {
    let entry = self.entries.get(code)?;
    let fresh =
      Utc::now() - entry.fetched_at < Duration::hours(CACHE_TTL_HOURS);
    fresh.then_some(&entry.payload)
  }

  /// Insert or overwrite the entry for `code`, stamped now, and mirror
  /// the whole map to the backend.
  pub fn put(&mut self, code: impl Into<String>, payload: ProductInfo) {
    self.entries.insert(code.into(), CacheEntry {
      payload,
      fetched_at: Utc::now(),
    });
    kv::persist(&self.store, keys::CACHE, &self.entries);
  }

  /// Drop every entry, including the persisted document.
  pub fn clear(&mut self) {
    self.entries.clear();
    self.store.remove(keys::CACHE);
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
