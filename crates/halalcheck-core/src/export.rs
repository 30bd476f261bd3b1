//! Data export for download or handoff.

use chrono::{DateTime, Utc, serde::ts_milliseconds};
use serde::Serialize;

use crate::{
  Result,
  favorites::FavoritesStore,
  history::HistoryStore,
  kv::KeyValueStore,
  record::ScanRecord,
};

/// A snapshot of both collections. The field names and nesting are the
/// interchange format of earlier releases; downstream tooling reads them,
/// so they must not change.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
  pub history:   Vec<ScanRecord>,
  pub favorites: Vec<ScanRecord>,
  #[serde(with = "ts_milliseconds")]
  pub timestamp: DateTime<Utc>,
}

impl ExportDocument {
  /// Pretty-printed JSON, as the download surface has always produced.
  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

/// Snapshot `history` and `favorites`, stamped now.
pub fn export_document<P: KeyValueStore>(
  history: &HistoryStore<P>,
  favorites: &FavoritesStore<P>,
) -> ExportDocument {
  ExportDocument {
    history:   history.list().to_vec(),
    favorites: favorites.list().to_vec(),
    timestamp: Utc::now(),
  }
}
