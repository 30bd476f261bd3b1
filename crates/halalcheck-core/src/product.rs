//! The product payload returned by a lookup source.
//!
//! Field names follow the Open Food Facts product object. Persisted cache
//! entries and exported documents reuse this shape, so the names are
//! load-bearing and must not change.

use serde::{Deserialize, Serialize};

use crate::prefs::Language;

// ─── Payload ─────────────────────────────────────────────────────────────────

/// A product record as returned by the lookup source.
///
/// Only the fields the checker reads are typed; everything else the source
/// sent is carried opaquely in `rest`, so a payload survives a
/// persist/reload round-trip without shedding data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInfo {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub product_name:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub product_name_ar:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub brands:              Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_small_url:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ingredients_text:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ingredients_text_ar: Option<String>,
  /// Comma-separated label string, e.g. `"Vegetarian, Vegan"`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub labels:              Option<String>,
  /// Canonical label tags, e.g. `"en:vegan"`.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub labels_tags:         Vec<String>,
  /// Additive tags, e.g. `"en:e471"`.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub additives_tags:      Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub nutriscore_grade:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub nova_group:          Option<u8>,
  /// Everything else the source sent, carried verbatim.
  #[serde(flatten)]
  pub rest:                serde_json::Map<String, serde_json::Value>,
}

impl ProductInfo {
  /// Display name in the requested language, falling back across locales.
  pub fn display_name(&self, lang: Language) -> &str {
    let picks = match lang {
      Language::Ar => [&self.product_name_ar, &self.product_name],
      Language::En => [&self.product_name, &self.product_name_ar],
    };
    picks.into_iter().find_map(|n| n.as_deref()).unwrap_or("—")
  }

  /// Ingredient text in the requested language, falling back across
  /// locales.
  pub fn ingredients(&self, lang: Language) -> &str {
    let picks = match lang {
      Language::Ar => [&self.ingredients_text_ar, &self.ingredients_text],
      Language::En => [&self.ingredients_text, &self.ingredients_text_ar],
    };
    picks.into_iter().find_map(|t| t.as_deref()).unwrap_or("—")
  }

  /// Assemble the classification evidence for this payload.
  ///
  /// The Arabic ingredient text takes precedence when present (the keyword
  /// tables cover Arabic synonyms), and the labels are the union of the
  /// canonical tags and the comma-split label string.
  pub fn evidence(&self) -> Evidence {
    let ingredients_text = self
      .ingredients_text_ar
      .as_deref()
      .or(self.ingredients_text.as_deref())
      .unwrap_or("")
      .to_owned();

    let labels: Vec<String> = self
      .labels_tags
      .iter()
      .cloned()
      .chain(
        self
          .labels
          .as_deref()
          .unwrap_or("")
          .split(',')
          .map(str::to_owned),
      )
      .filter(|l| !l.is_empty())
      .collect();

    Evidence {
      ingredients_text,
      labels,
      additive_tags: self.additives_tags.clone(),
    }
  }
}

// ─── Evidence ────────────────────────────────────────────────────────────────

/// The classification inputs for one product. Constructed per lookup,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct Evidence {
  pub ingredients_text: String,
  pub labels:           Vec<String>,
  pub additive_tags:    Vec<String>,
}
