//! Unbounded, deduplicated, recency-ordered set of saved products.
//!
//! The store guarantees at most one entry per code. Whether an `add` is
//! part of a toggle is the caller's concern, not the store's.

use crate::{
  kv::{self, KeyValueStore, keys},
  record::ScanRecord,
};

pub struct FavoritesStore<P> {
  records: Vec<ScanRecord>,
  store:   P,
}

impl<P: KeyValueStore> FavoritesStore<P> {
  /// Load the persisted set once; an unreadable document starts empty.
  pub fn new(store: P) -> Self {
    let records = kv::load_or_default(&store, keys::FAVORITES);
    Self { records, store }
  }

  /// Save `record`, replacing any prior entry for the same code and
  /// placing it first.
  pub fn add(&mut self, record: ScanRecord) {
    self.records.retain(|r| r.code != record.code);
    self.records.insert(0, record);
    kv::persist(&self.store, keys::FAVORITES, &self.records);
  }

  /// Drop the entry for `code`, if any.
  pub fn remove(&mut self, code: &str) {
    self.records.retain(|r| r.code != code);
    kv::persist(&self.store, keys::FAVORITES, &self.records);
  }

  pub fn contains(&self, code: &str) -> bool {
    self.records.iter().any(|r| r.code == code)
  }

  /// Most-recently-added-first view of the set.
  pub fn list(&self) -> &[ScanRecord] { &self.records }
}
