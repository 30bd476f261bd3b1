//! Integration tests for `SqliteStore` against an in-memory database.

use halalcheck_core::kv::KeyValueStore;
use serde_json::json;

use crate::SqliteStore;

fn store() -> SqliteStore {
  SqliteStore::open_in_memory().expect("in-memory store")
}

#[test]
fn set_then_get_roundtrip() {
  let s = store();
  assert!(s.set("halal_history", &json!([{"code": "123"}])));
  assert_eq!(s.get("halal_history"), Some(json!([{"code": "123"}])));
}

#[test]
fn get_missing_returns_none() {
  let s = store();
  assert!(s.get("halal_cache").is_none());
}

#[test]
fn set_overwrites_existing_value() {
  let s = store();
  s.set("halal_lang", &json!("ar"));
  s.set("halal_lang", &json!("en"));
  assert_eq!(s.get("halal_lang"), Some(json!("en")));
}

#[test]
fn remove_deletes_the_row() {
  let s = store();
  s.set("halal_theme", &json!(true));
  assert!(s.remove("halal_theme"));
  assert!(s.get("halal_theme").is_none());
}

#[test]
fn remove_missing_key_still_succeeds() {
  let s = store();
  assert!(s.remove("halal_favorites"));
}

#[test]
fn corrupt_value_reads_as_absent() {
  let s = store();
  s.with_conn(|conn| {
    conn
      .execute(
        "INSERT INTO kv (key, value, updated_at) VALUES ('halal_cache', '{not json', '')",
        [],
      )
      .expect("raw insert")
  });
  assert!(s.get("halal_cache").is_none());
}

#[test]
fn values_survive_reopening_the_file() {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = dir.path().join("halalcheck.db");

  {
    let s = SqliteStore::open(&path).expect("open store");
    s.set("halal_lang", &json!("en"));
  }

  let reopened = SqliteStore::open(&path).expect("reopen store");
  assert_eq!(reopened.get("halal_lang"), Some(json!("en")));
}

#[test]
fn clones_share_the_same_database() {
  let s = store();
  let clone = s.clone();
  s.set("halal_theme", &json!(false));
  assert_eq!(clone.get("halal_theme"), Some(json!(false)));
}
