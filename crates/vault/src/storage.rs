//! HTTP archive storage client.
//!
//! Thin reqwest wrapper over the object-storage bucket holding the
//! archival JSON and media. Chunk documents live at
//! `{domain}/chunks/{kind}_chunk_{N}.json` with a `manifest.json`
//! next to them declaring totals.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::chunks::ChunkFetcher;
use crate::error::{Result, VaultError};
use crate::manifest::Manifest;
use crate::media::UrlSource;
use crate::record::Record;

/// Configuration for the archive storage client.
#[derive(Debug, Clone)]
pub struct StorageConfig {
  /// Base URL of the archive bucket.
  pub base_url: String,
  /// Request timeout in seconds.
  pub timeout_secs: u64,
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self { base_url: "http://localhost:9000/archive".to_string(), timeout_secs: 30 }
  }
}

impl StorageConfig {
  /// Default configuration with the `VAULT_ARCHIVE_URL` environment
  /// variable taking precedence for the base URL.
  pub fn from_env() -> Self {
    let mut config = Self::default();
    if let Ok(base_url) = std::env::var("VAULT_ARCHIVE_URL") {
      if !base_url.is_empty() {
        config.base_url = base_url;
      }
    }
    config
  }
}

/// Path of chunk document `index` for a record kind under a domain.
pub fn chunk_path(domain: &str, kind: &str, index: usize) -> String {
  format!("{domain}/chunks/{kind}_chunk_{index}.json")
}

/// Path of the chunk manifest for a domain.
pub fn manifest_path(domain: &str) -> String {
  format!("{domain}/chunks/manifest.json")
}

/// HTTP client for the archive bucket.
#[derive(Clone)]
pub struct StorageClient {
  client: Client,
  config: StorageConfig,
}

impl Default for StorageClient {
  fn default() -> Self {
    Self::new()
  }
}

impl StorageClient {
  pub fn new() -> Self {
    Self::with_config(StorageConfig::from_env())
  }

  pub fn with_config(config: StorageConfig) -> Self {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .expect("Failed to create HTTP client");
    Self { client, config }
  }

  /// Absolute URL of an object in the bucket.
  pub fn object_url(&self, path: &str) -> Result<String> {
    let base = Url::parse(&self.config.base_url)?;
    let trimmed = path.trim_start_matches('/');
    Ok(format!("{}/{}", base.as_str().trim_end_matches('/'), trimmed))
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let url = self.object_url(path)?;
    let response = self.client.get(&url).send().await?;
    if !response.status().is_success() {
      return Err(VaultError::Status {
        status: response.status().as_u16(),
        path: path.to_string(),
      });
    }
    let body = response.text().await?;
    serde_json::from_str(&body)
      .map_err(|source| VaultError::Decode { path: path.to_string(), source })
  }

  /// Fetch and parse a JSON document, collapsing any failure to
  /// `None`. Non-2xx, transport and parse errors are logged and read
  /// as "document does not exist".
  pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
    match self.get_json(path).await {
      Ok(value) => Some(value),
      Err(err) => {
        quill::warn(&format!("storage fetch failed for {path}: {err}"));
        None
      }
    }
  }

  /// Fetch the chunk manifest for a domain, if one exists.
  pub async fn fetch_manifest(&self, domain: &str) -> Option<Manifest> {
    self.fetch_json(&manifest_path(domain)).await
  }

  /// A `ChunkFetcher` bound to one domain and record kind.
  pub fn chunk_source(&self, domain: &str, kind: &str) -> ChunkSource {
    ChunkSource { client: self.clone(), domain: domain.to_string(), kind: kind.to_string() }
  }
}

/// Fetches numbered chunk documents for one archive domain and kind.
pub struct ChunkSource {
  client: StorageClient,
  domain: String,
  kind: String,
}

#[async_trait]
impl ChunkFetcher for ChunkSource {
  async fn fetch_chunk(&self, index: usize) -> Option<Vec<Record>> {
    self.client.fetch_json(&chunk_path(&self.domain, &self.kind, index)).await
  }
}

#[async_trait]
impl UrlSource for StorageClient {
  /// Probe the object URL; an object that answers the probe resolves
  /// to its direct download URL.
  async fn lookup(&self, path: &str) -> Result<String> {
    let url = self.object_url(path)?;
    let response = self.client.head(&url).send().await?;
    if !response.status().is_success() {
      return Err(VaultError::Status {
        status: response.status().as_u16(),
        path: path.to_string(),
      });
    }
    Ok(url)
  }
}
