//! Async HTTP client for the Open Food Facts product API.

use std::time::Duration;

use halalcheck_core::{
  Error, Result, product::ProductInfo, source::ProductSource,
};
use serde::Deserialize;

/// Connection settings for the Open Food Facts API.
#[derive(Debug, Clone)]
pub struct OffConfig {
  /// Base URL, e.g. `https://world.openfoodfacts.org`.
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for OffConfig {
  fn default() -> Self {
    Self {
      base_url: "https://world.openfoodfacts.org".to_owned(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async client for the Open Food Facts v2 product endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OffClient {
  client: reqwest::Client,
  config: OffConfig,
}

/// Shape of the v2 product response; `product` is null or absent for
/// unknown identifiers.
#[derive(Debug, Deserialize)]
struct ProductResponse {
  #[serde(default)]
  product: Option<ProductInfo>,
}

impl OffClient {
  pub fn new(config: OffConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| Error::Network(e.to_string()))?;
    Ok(Self { client, config })
  }

  fn url(&self, code: &str) -> String {
    format!(
      "{}/api/v2/product/{code}.json",
      self.config.base_url.trim_end_matches('/')
    )
  }
}

impl ProductSource for OffClient {
  async fn fetch(&self, code: &str) -> Result<ProductInfo> {
    let url = self.url(code);
    tracing::debug!(code, "fetching product");

    let resp = self
      .client
      .get(&url)
      .send()
      .await
      .map_err(|e| Error::Network(e.to_string()))?;

    if !resp.status().is_success() {
      return Err(Error::Network(format!("GET {url} → {}", resp.status())));
    }

    let body: ProductResponse = resp
      .json()
      .await
      .map_err(|e| Error::Network(e.to_string()))?;

    body.product.ok_or_else(|| Error::NotFound(code.to_owned()))
  }
}
