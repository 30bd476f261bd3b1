//! Persisted user preferences: display language and theme.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::kv::{self, KeyValueStore, keys};

/// Display language. Arabic is the historical default.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
  #[default]
  Ar,
  En,
}

pub struct Preferences<P> {
  language:  Language,
  dark_mode: bool,
  store:     P,
}

impl<P: KeyValueStore> Preferences<P> {
  /// Load both preferences once; missing or unreadable values fall back
  /// to the defaults (Arabic, light theme).
  pub fn new(store: P) -> Self {
    let language = kv::load_or_default(&store, keys::LANGUAGE);
    let dark_mode = kv::load_or_default(&store, keys::THEME);
    Self {
      language,
      dark_mode,
      store,
    }
  }

  pub fn language(&self) -> Language { self.language }

  pub fn set_language(&mut self, language: Language) {
    self.language = language;
    kv::persist(&self.store, keys::LANGUAGE, &language);
  }

  pub fn dark_mode(&self) -> bool { self.dark_mode }

  pub fn set_dark_mode(&mut self, on: bool) {
    self.dark_mode = on;
    kv::persist(&self.store, keys::THEME, &on);
  }
}
