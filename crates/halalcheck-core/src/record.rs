//! Scan records — the unit stored in history and favorites.

use chrono::{DateTime, Utc, serde::ts_milliseconds};
use serde::{Deserialize, Serialize};

use crate::{
  classify::{Classification, classify, harmful_additives},
  product::ProductInfo,
};

/// One completed lookup: the payload plus its verdict, stamped when the
/// record was made.
///
/// The serialized field names (`p`, `cls`, `additives`, `timestamp`) are
/// the persisted and exported wire format of earlier releases; downstream
/// tooling reads them, so they must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
  /// The identifier (barcode) this record was looked up under.
  pub code:              String,
  #[serde(rename = "p")]
  pub product:           ProductInfo,
  #[serde(rename = "cls")]
  pub classification:    Classification,
  /// Harmful additive codes surfaced to the user, independent of the
  /// verdict.
  #[serde(rename = "additives", default)]
  pub harmful_additives: Vec<String>,
  #[serde(rename = "timestamp", with = "ts_milliseconds")]
  pub recorded_at:       DateTime<Utc>,
}

impl ScanRecord {
  /// Build a record for `code` from a fetched payload: classify its
  /// evidence, extract the harmful additives, and stamp the current time.
  pub fn new(code: impl Into<String>, product: ProductInfo) -> Self {
    let classification = classify(&product.evidence());
    let harmful = harmful_additives(&product.additives_tags);
    Self {
      code: code.into(),
      product,
      classification,
      harmful_additives: harmful,
      recorded_at: Utc::now(),
    }
  }
}
