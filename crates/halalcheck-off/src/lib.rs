//! Open Food Facts client.
//!
//! Implements [`ProductSource`](halalcheck_core::source::ProductSource)
//! over the public v2 product API. This is the only crate in the
//! workspace that talks to the network.

mod client;

pub use client::{OffClient, OffConfig};
