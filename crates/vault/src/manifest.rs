//! Chunk manifest model.
//!
//! A `manifest.json` alongside the chunk documents declares how many
//! records each kind holds, which lets the pager stop probing instead
//! of fetching until a chunk comes back absent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Records per chunk document unless the manifest says otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Declared totals for the chunked archive at one prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
  #[serde(default = "default_chunk_size")]
  pub chunk_size: usize,
  /// Total record count per kind ("scraps", "updates", "tweets", ...).
  #[serde(default)]
  pub totals: HashMap<String, usize>,
}

fn default_chunk_size() -> usize {
  DEFAULT_CHUNK_SIZE
}

impl Manifest {
  pub fn total_for(&self, kind: &str) -> Option<usize> {
    self.totals.get(kind).copied()
  }

  /// How many chunk documents the declared total spans.
  pub fn chunk_count(&self, kind: &str) -> Option<usize> {
    let total = self.total_for(kind)?;
    if self.chunk_size == 0 {
      return None;
    }
    Some(total.div_ceil(self.chunk_size))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_totals_and_defaults_chunk_size() {
    let manifest: Manifest =
      serde_json::from_str(r#"{ "totals": { "scraps": 1803, "tweets": 150 } }"#).unwrap();
    assert_eq!(manifest.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(manifest.total_for("scraps"), Some(1803));
    assert_eq!(manifest.total_for("photos"), None);
  }

  #[test]
  fn chunk_count_rounds_up() {
    let manifest: Manifest =
      serde_json::from_str(r#"{ "chunk_size": 100, "totals": { "tweets": 150, "even": 200 } }"#)
        .unwrap();
    assert_eq!(manifest.chunk_count("tweets"), Some(2));
    assert_eq!(manifest.chunk_count("even"), Some(2));
    assert_eq!(manifest.chunk_count("missing"), None);
  }
}
