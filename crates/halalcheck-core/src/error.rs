//! Error types for `halalcheck-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The source answered, but no product record exists for the identifier.
  #[error("product not found: {0}")]
  NotFound(String),

  /// Transport failure or a non-success response from the source.
  #[error("network error: {0}")]
  Network(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
