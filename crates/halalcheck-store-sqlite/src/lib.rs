//! SQLite backend for the checker's persisted key/value space.
//!
//! One table, one row per key, JSON documents as text. The
//! [`KeyValueStore`](halalcheck_core::kv::KeyValueStore) contract swallows
//! per-operation failures, so only opening the database can error.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
