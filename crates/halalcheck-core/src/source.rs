//! The external lookup collaborator.

use crate::{Result, product::ProductInfo};

/// Asynchronous product lookup by identifier.
///
/// Implementations fail with [`Error::NotFound`](crate::Error::NotFound)
/// when no record exists for the identifier, and
/// [`Error::Network`](crate::Error::Network) on transport failure. Both
/// propagate to the host unchanged so it can render a distinct message
/// for each.
pub trait ProductSource {
  async fn fetch(&self, code: &str) -> Result<ProductInfo>;
}
