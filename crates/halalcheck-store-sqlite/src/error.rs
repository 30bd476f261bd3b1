//! Error type for `halalcheck-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
