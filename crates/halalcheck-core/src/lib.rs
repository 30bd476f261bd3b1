//! Core types and decision logic for the halalcheck product checker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod cache;
pub mod classify;
pub mod error;
pub mod export;
pub mod favorites;
pub mod history;
pub mod kv;
pub mod lookup;
pub mod prefs;
pub mod product;
pub mod record;
pub mod source;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
