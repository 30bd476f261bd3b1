//! Bounded, deduplicated, recency-ordered log of completed lookups.

use serde::Serialize;

use crate::{
  classify::Verdict,
  kv::{self, KeyValueStore, keys},
  record::ScanRecord,
};

/// Hard cap on retained records; older entries fall off the tail.
pub const MAX_HISTORY: usize = 50;

/// Aggregate verdict counts over the retained history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
  pub total:    usize,
  pub halal:    usize,
  pub doubtful: usize,
  pub haram:    usize,
}

pub struct HistoryStore<P> {
  records: Vec<ScanRecord>,
  store:   P,
}

impl<P: KeyValueStore> HistoryStore<P> {
  /// Load the persisted log once; an unreadable document starts empty.
  pub fn new(store: P) -> Self {
    let records = kv::load_or_default(&store, keys::HISTORY);
    Self { records, store }
  }

  /// Record a completed lookup: any prior record for the same code is
  /// dropped, the new record goes first, and the log is trimmed to
  /// [`MAX_HISTORY`] before the whole sequence is persisted.
  pub fn add(&mut self, record: ScanRecord) {
    self.records.retain(|r| r.code != record.code);
    self.records.insert(0, record);
    self.records.truncate(MAX_HISTORY);
    kv::persist(&self.store, keys::HISTORY, &self.records);
  }

  /// Empty the log, including the persisted document.
  pub fn clear(&mut self) {
    self.records.clear();
    self.store.remove(keys::HISTORY);
  }

  /// Most-recent-first view of the log.
  pub fn list(&self) -> &[ScanRecord] { &self.records }

  /// Verdict counts over the retained log.
  pub fn stats(&self) -> HistoryStats {
    let mut stats = HistoryStats {
      total: self.records.len(),
      ..HistoryStats::default()
    };
    for record in &self.records {
      match record.classification.verdict {
        Verdict::Halal => stats.halal += 1,
        Verdict::Doubtful => stats.doubtful += 1,
        Verdict::Haram => stats.haram += 1,
      }
    }
    stats
  }
}
