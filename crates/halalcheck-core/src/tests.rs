//! Integration tests for the stores, the cache, and the lookup path,
//! all against the in-memory backend.

use std::sync::{
  Arc,
  atomic::{AtomicUsize, Ordering},
};

use chrono::{Duration, Utc};
use serde_json::{Value, json};

use crate::{
  Error,
  cache::ProductCache,
  export::export_document,
  favorites::FavoritesStore,
  history::{HistoryStore, MAX_HISTORY},
  kv::{KeyValueStore, MemoryStore, keys},
  lookup::Checker,
  prefs::{Language, Preferences},
  product::ProductInfo,
  record::ScanRecord,
  source::ProductSource,
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn product(name: &str, ingredients: &str) -> ProductInfo {
  ProductInfo {
    product_name: Some(name.to_owned()),
    ingredients_text: Some(ingredients.to_owned()),
    ..ProductInfo::default()
  }
}

fn record(code: &str) -> ScanRecord {
  ScanRecord::new(code, product("Test product", "water, salt"))
}

/// A backend whose every operation fails; mutations must still complete
/// from the store's point of view.
#[derive(Clone, Default)]
struct FailingStore;

impl KeyValueStore for FailingStore {
  fn get(&self, _key: &str) -> Option<Value> { None }

  fn set(&self, _key: &str, _value: &Value) -> bool { false }

  fn remove(&self, _key: &str) -> bool { false }
}

// ─── History ─────────────────────────────────────────────────────────────────

#[test]
fn history_add_dedupes_and_promotes() {
  let mut history = HistoryStore::new(MemoryStore::new());

  let mut early = record("100");
  early.recorded_at = Utc::now() - Duration::hours(1);
  history.add(early);
  history.add(record("200"));

  let latest = record("100");
  let latest_stamp = latest.recorded_at;
  history.add(latest);

  let codes: Vec<&str> =
    history.list().iter().map(|r| r.code.as_str()).collect();
  assert_eq!(codes, ["100", "200"]);
  assert_eq!(history.list()[0].recorded_at, latest_stamp);
}

#[test]
fn history_never_exceeds_the_cap() {
  let mut history = HistoryStore::new(MemoryStore::new());
  for i in 0..60 {
    history.add(record(&i.to_string()));
  }

  assert_eq!(history.list().len(), MAX_HISTORY);
  assert_eq!(history.list()[0].code, "59");
  assert!(!history.list().iter().any(|r| r.code == "9"));
}

#[test]
fn history_survives_reconstruction() {
  let mem = MemoryStore::new();

  let mut history = HistoryStore::new(mem.clone());
  history.add(record("100"));
  history.add(record("200"));
  drop(history);

  let reloaded = HistoryStore::new(mem);
  let codes: Vec<&str> =
    reloaded.list().iter().map(|r| r.code.as_str()).collect();
  assert_eq!(codes, ["200", "100"]);
}

#[test]
fn history_clear_removes_the_persisted_document() {
  let mem = MemoryStore::new();
  let mut history = HistoryStore::new(mem.clone());
  history.add(record("100"));

  history.clear();
  assert!(history.list().is_empty());
  assert!(mem.get(keys::HISTORY).is_none());
}

#[test]
fn history_stats_count_by_verdict() {
  let mut history = HistoryStore::new(MemoryStore::new());
  history.add(ScanRecord::new("1", product("A", "water")));
  history.add(ScanRecord::new("2", product("B", "gelatin")));
  history.add(ScanRecord::new("3", product("C", "E471")));
  history.add(ScanRecord::new("4", product("D", "sugar")));

  let stats = history.stats();
  assert_eq!(stats.total, 4);
  assert_eq!(stats.halal, 2);
  assert_eq!(stats.haram, 1);
  assert_eq!(stats.doubtful, 1);
}

#[test]
fn history_mutation_completes_when_persistence_fails() {
  let mut history = HistoryStore::new(FailingStore);
  history.add(record("100"));
  assert_eq!(history.list().len(), 1);
}

// ─── Favorites ───────────────────────────────────────────────────────────────

#[test]
fn favorites_add_then_remove_restores_prior_state() {
  let mem = MemoryStore::new();
  let mut favorites = FavoritesStore::new(mem.clone());

  favorites.add(record("100"));
  assert!(favorites.contains("100"));

  favorites.remove("100");
  assert!(!favorites.contains("100"));
  assert!(favorites.list().is_empty());
  assert_eq!(mem.get(keys::FAVORITES), Some(json!([])));
}

#[test]
fn favorites_dedupe_and_promote() {
  let mut favorites = FavoritesStore::new(MemoryStore::new());
  favorites.add(record("100"));
  favorites.add(record("200"));
  favorites.add(record("100"));

  let codes: Vec<&str> =
    favorites.list().iter().map(|r| r.code.as_str()).collect();
  assert_eq!(codes, ["100", "200"]);
}

#[test]
fn favorites_survive_reconstruction() {
  let mem = MemoryStore::new();
  let mut favorites = FavoritesStore::new(mem.clone());
  favorites.add(record("100"));
  drop(favorites);

  let reloaded = FavoritesStore::new(mem);
  assert!(reloaded.contains("100"));
}

// ─── Cache ───────────────────────────────────────────────────────────────────

#[test]
fn cache_serves_a_fresh_entry() {
  let mut cache = ProductCache::new(MemoryStore::new());
  cache.put("123", product("Dates", "dates"));

  let hit = cache.get("123").expect("fresh entry");
  assert_eq!(hit.product_name.as_deref(), Some("Dates"));
}

#[test]
fn cache_reports_a_stale_entry_as_a_miss() {
  let mem = MemoryStore::new();
  let stale = (Utc::now() - Duration::hours(25)).timestamp_millis();
  let fresh = (Utc::now() - Duration::hours(1)).timestamp_millis();
  mem.set(keys::CACHE, &json!({
    "123": { "data": { "product_name": "Old" },   "timestamp": stale },
    "456": { "data": { "product_name": "Fresh" }, "timestamp": fresh },
  }));

  let cache = ProductCache::new(mem);
  assert!(cache.get("123").is_none());
  assert!(cache.get("456").is_some());
  // Stale entries are not swept, only skipped.
  assert_eq!(cache.len(), 2);
}

#[test]
fn cache_clear_removes_the_persisted_document() {
  let mem = MemoryStore::new();
  let mut cache = ProductCache::new(mem.clone());
  cache.put("123", product("Dates", "dates"));

  cache.clear();
  assert!(cache.is_empty());
  assert!(mem.get(keys::CACHE).is_none());
}

#[test]
fn cache_unreadable_document_starts_empty() {
  let mem = MemoryStore::new();
  mem.set(keys::CACHE, &json!("not a map"));
  let cache = ProductCache::new(mem);
  assert!(cache.is_empty());
}

// ─── Preferences ─────────────────────────────────────────────────────────────

#[test]
fn preferences_default_to_arabic_and_light_theme() {
  let prefs = Preferences::new(MemoryStore::new());
  assert_eq!(prefs.language(), Language::Ar);
  assert!(!prefs.dark_mode());
}

#[test]
fn preferences_persist_across_reconstruction() {
  let mem = MemoryStore::new();
  let mut prefs = Preferences::new(mem.clone());
  prefs.set_language(Language::En);
  prefs.set_dark_mode(true);
  drop(prefs);

  let reloaded = Preferences::new(mem);
  assert_eq!(reloaded.language(), Language::En);
  assert!(reloaded.dark_mode());
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
struct StubSource {
  payload: ProductInfo,
  calls:   Arc<AtomicUsize>,
}

impl ProductSource for StubSource {
  async fn fetch(&self, _code: &str) -> crate::Result<ProductInfo> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.payload.clone())
  }
}

struct MissingSource;

impl ProductSource for MissingSource {
  async fn fetch(&self, code: &str) -> crate::Result<ProductInfo> {
    Err(Error::NotFound(code.to_owned()))
  }
}

fn checker_over(
  source: StubSource,
) -> Checker<StubSource, MemoryStore> {
  let mem = MemoryStore::new();
  Checker::new(
    source,
    ProductCache::new(mem.clone()),
    HistoryStore::new(mem),
  )
}

#[tokio::test]
async fn check_fetches_once_then_serves_from_cache() {
  let calls = Arc::new(AtomicUsize::new(0));
  let source = StubSource {
    payload: product("Dates", "dates, sugar"),
    calls:   calls.clone(),
  };
  let mut checker = checker_over(source);

  let first = checker.check("123").await.expect("first check");
  let second = checker.check("123").await.expect("second check");

  assert_eq!(calls.load(Ordering::SeqCst), 1);
  assert_eq!(first.code, "123");
  assert_eq!(
    second.product.product_name.as_deref(),
    Some("Dates")
  );
}

#[tokio::test]
async fn check_appends_to_history() {
  let source = StubSource {
    payload: product("Dates", "dates"),
    calls:   Arc::new(AtomicUsize::new(0)),
  };
  let mut checker = checker_over(source);

  checker.check("123").await.expect("check");
  assert_eq!(checker.history().list().len(), 1);
  assert_eq!(checker.history().list()[0].code, "123");
}

#[tokio::test]
async fn check_propagates_not_found() {
  let mem = MemoryStore::new();
  let mut checker = Checker::new(
    MissingSource,
    ProductCache::new(mem.clone()),
    HistoryStore::new(mem),
  );

  let err = checker.check("999").await.expect_err("missing product");
  assert!(matches!(err, Error::NotFound(code) if code == "999"));
  assert!(checker.history().list().is_empty());
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[test]
fn export_document_keeps_the_wire_field_names() {
  let mem = MemoryStore::new();
  let mut history = HistoryStore::new(mem.clone());
  let mut favorites = FavoritesStore::new(mem);
  history.add(record("100"));
  favorites.add(record("100"));

  let doc = export_document(&history, &favorites);
  let value = serde_json::to_value(&doc).expect("serialize export");

  assert!(value.get("history").is_some());
  assert!(value.get("favorites").is_some());
  assert!(value.get("timestamp").expect("timestamp").is_i64());

  let entry = &value["history"][0];
  for field in ["code", "p", "cls", "additives", "timestamp"] {
    assert!(entry.get(field).is_some(), "missing field {field:?}");
  }
  assert_eq!(entry["cls"]["verdict"], "halal");
  assert_eq!(entry["cls"]["confidence"], "medium");
}
