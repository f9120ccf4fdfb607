//! Error taxonomy for the storage layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

/// Failures the storage layer can hit while talking to the archive.
///
/// None of these escape the loading contracts: `load_chunk` and
/// `resolve` log the error and collapse it to `None` / an empty
/// string, so pagination and rendering treat "failed" and "absent"
/// identically.
#[derive(Debug, Error)]
pub enum VaultError {
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("unexpected status {status} for {path}")]
  Status { status: u16, path: String },

  #[error("malformed document at {path}: {source}")]
  Decode {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid archive url: {0}")]
  Config(#[from] url::ParseError),
}
