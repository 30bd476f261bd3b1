//! Command dispatch over the assembled components.

use std::path::Path;

use anyhow::{Context, Result};
use halalcheck_core::{
  Error,
  cache::ProductCache,
  export::export_document,
  favorites::FavoritesStore,
  history::HistoryStore,
  lookup::Checker,
  prefs::{Language, Preferences},
};
use halalcheck_off::{OffClient, OffConfig};
use halalcheck_store_sqlite::SqliteStore;

use crate::{Command, ThemeArg, output};

pub struct App {
  checker:   Checker<OffClient, SqliteStore>,
  favorites: FavoritesStore<SqliteStore>,
  prefs:     Preferences<SqliteStore>,
  lang:      Language,
}

impl App {
  /// Open the store, wire every component to it, and resolve the display
  /// language.
  pub fn open(
    db_path: &Path,
    base_url: String,
    lang_override: Option<Language>,
  ) -> Result<Self> {
    let store = SqliteStore::open(db_path)
      .with_context(|| format!("opening store at {}", db_path.display()))?;

    let source = OffClient::new(OffConfig {
      base_url,
      ..OffConfig::default()
    })
    .context("building lookup client")?;

    let checker = Checker::new(
      source,
      ProductCache::new(store.clone()),
      HistoryStore::new(store.clone()),
    );
    let favorites = FavoritesStore::new(store.clone());
    let prefs = Preferences::new(store);
    let lang = lang_override.unwrap_or_else(|| prefs.language());

    Ok(Self {
      checker,
      favorites,
      prefs,
      lang,
    })
  }

  pub async fn run(&mut self, command: Command) -> Result<()> {
    let msgs = output::messages(self.lang);
    match command {
      Command::Check { barcode } => self.check(&barcode).await,
      Command::Favorite { barcode } => self.toggle_favorite(&barcode).await,
      Command::Favorites => {
        output::print_records(
          self.favorites.list(),
          self.lang,
          msgs.no_favorites,
        );
        Ok(())
      }
      Command::History { clear } => {
        if clear {
          self.checker.history_mut().clear();
          println!("{}", msgs.history_cleared);
        } else {
          output::print_records(
            self.checker.history().list(),
            self.lang,
            msgs.no_history,
          );
        }
        Ok(())
      }
      Command::Stats => {
        output::print_stats(&self.checker.history().stats(), self.lang);
        Ok(())
      }
      Command::Export { output } => self.export(output.as_deref()),
      Command::ClearCache => {
        self.checker.clear_cache();
        println!("{}", msgs.cache_cleared);
        Ok(())
      }
      Command::Lang { language } => {
        self.prefs.set_language(language);
        Ok(())
      }
      Command::Theme { theme } => {
        self.prefs.set_dark_mode(matches!(theme, ThemeArg::Dark));
        Ok(())
      }
    }
  }

  async fn check(&mut self, barcode: &str) -> Result<()> {
    let code = digits(barcode);
    if code.is_empty() {
      anyhow::bail!("barcode must contain at least one digit");
    }
    match self.checker.check(&code).await {
      Ok(record) => {
        let favorite = self.favorites.contains(&code);
        output::print_record(&record, self.lang, favorite);
        Ok(())
      }
      Err(err @ (Error::NotFound(_) | Error::Network(_))) => {
        println!("{}", output::lookup_failure(&err, self.lang));
        Ok(())
      }
      Err(err) => Err(err.into()),
    }
  }

  async fn toggle_favorite(&mut self, barcode: &str) -> Result<()> {
    let code = digits(barcode);
    if code.is_empty() {
      anyhow::bail!("barcode must contain at least one digit");
    }
    let msgs = output::messages(self.lang);

    if self.favorites.contains(&code) {
      self.favorites.remove(&code);
      println!("{}", msgs.removed_favorite);
      return Ok(());
    }

    match self.checker.check(&code).await {
      Ok(record) => {
        self.favorites.add(record);
        println!("{}", msgs.added_favorite);
        Ok(())
      }
      Err(err @ (Error::NotFound(_) | Error::Network(_))) => {
        println!("{}", output::lookup_failure(&err, self.lang));
        Ok(())
      }
      Err(err) => Err(err.into()),
    }
  }

  fn export(&self, path: Option<&Path>) -> Result<()> {
    let doc = export_document(self.checker.history(), &self.favorites);
    let json = doc.to_json_pretty().context("serialising export")?;
    match path {
      Some(path) => {
        std::fs::write(path, &json)
          .with_context(|| format!("writing {}", path.display()))?;
        println!("Exported to {}", path.display());
      }
      None => println!("{json}"),
    }
    Ok(())
  }
}

/// Barcode inputs keep only their ASCII digits, matching the scanner
/// field's filtering.
fn digits(raw: &str) -> String {
  raw.chars().filter(char::is_ascii_digit).collect()
}
