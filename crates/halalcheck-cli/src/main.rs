//! `halalcheck` — command-line host for the halalcheck product checker.
//!
//! # Usage
//!
//! ```
//! halalcheck check 3017620422003
//! halalcheck favorite 3017620422003
//! halalcheck history
//! halalcheck export -o halal-data.json
//! ```

mod app;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand, ValueEnum};
use halalcheck_core::prefs::Language;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "halalcheck",
  about = "Check packaged food products against dietary rules"
)]
struct Args {
  /// Path to a TOML config file (db, base_url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Path to the SQLite database holding history, favorites, and cache.
  #[arg(long, env = "HALALCHECK_DB")]
  db: Option<PathBuf>,

  /// Base URL of the product lookup service.
  #[arg(long, env = "HALALCHECK_BASE_URL")]
  base_url: Option<String>,

  /// Display language for this invocation (overrides the saved
  /// preference).
  #[arg(long)]
  lang: Option<Language>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Look up a product by barcode and classify it.
  Check { barcode: String },

  /// Add or remove a product from favorites (toggles).
  Favorite { barcode: String },

  /// List saved favorites, most recently added first.
  Favorites,

  /// Show past lookups, most recent first.
  History {
    /// Remove every history entry.
    #[arg(long)]
    clear: bool,
  },

  /// Verdict totals over the retained history.
  Stats,

  /// Write history and favorites as a JSON document.
  Export {
    /// Output path; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Drop all cached product payloads.
  ClearCache,

  /// Save the display language preference.
  Lang { language: Language },

  /// Save the theme preference.
  Theme { theme: ThemeArg },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeArg {
  Light,
  Dark,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  db:       String,
  #[serde(default)]
  base_url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let db_path = match args.db {
    Some(path) => path,
    None if !file_cfg.db.is_empty() => PathBuf::from(&file_cfg.db),
    None => default_db_path()?,
  };
  let base_url = args
    .base_url
    .or_else(|| {
      (!file_cfg.base_url.is_empty()).then(|| file_cfg.base_url.clone())
    })
    .unwrap_or_else(|| "https://world.openfoodfacts.org".to_owned());

  let mut app = App::open(&db_path, base_url, args.lang)?;
  app.run(args.command).await
}

/// `~/.local/share/halalcheck/halalcheck.db`, creating the directory if
/// needed.
fn default_db_path() -> Result<PathBuf> {
  let home = std::env::var("HOME").context("HOME is not set")?;
  let dir = PathBuf::from(home).join(".local/share/halalcheck");
  std::fs::create_dir_all(&dir)
    .with_context(|| format!("creating data directory {}", dir.display()))?;
  Ok(dir.join("halalcheck.db"))
}
