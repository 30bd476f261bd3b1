//! The lookup orchestrator: cache, fetch, classify, record.

use crate::{
  Result,
  cache::ProductCache,
  history::HistoryStore,
  kv::KeyValueStore,
  record::ScanRecord,
  source::ProductSource,
};

/// Drives one product check end to end.
///
/// Construct one `Checker` at startup and hand it to whatever hosts the
/// lookups — there is no ambient instance. All store mutation happens
/// synchronously on the calling thread; the only suspension point is the
/// source fetch. Because [`check`](Self::check) borrows the checker
/// mutably, a second lookup cannot start until the first resolves, so
/// out-of-order results cannot clobber each other.
pub struct Checker<S, P> {
  source:  S,
  cache:   ProductCache<P>,
  history: HistoryStore<P>,
}

impl<S: ProductSource, P: KeyValueStore> Checker<S, P> {
  pub fn new(
    source: S,
    cache: ProductCache<P>,
    history: HistoryStore<P>,
  ) -> Self {
    Self {
      source,
      cache,
      history,
    }
  }

  /// Look up `code`, classify the result, and append it to history.
  ///
  /// A fresh cache hit skips the source entirely; a miss or stale entry
  /// awaits the source and overwrites the cached payload with a new
  /// stamp.
  pub async fn check(&mut self, code: &str) -> Result<ScanRecord> {
    let payload = if let Some(hit) = self.cache.get(code) {
      hit.clone()
    } else {
      let fetched = self.source.fetch(code).await?;
      self.cache.put(code, fetched.clone());
      fetched
    };

    let record = ScanRecord::new(code, payload);
    self.history.add(record.clone());
    Ok(record)
  }

  pub fn history(&self) -> &HistoryStore<P> { &self.history }

  pub fn history_mut(&mut self) -> &mut HistoryStore<P> { &mut self.history }

  pub fn cache(&self) -> &ProductCache<P> { &self.cache }

  pub fn clear_cache(&mut self) { self.cache.clear(); }
}
