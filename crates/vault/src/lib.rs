//! Archive storage layer for the nostalgia viewers.
//!
//! Chunked loading of large historical record sets, an incremental
//! pager driven by sentinel visibility, and a session-wide media URL
//! resolver. Everything is in-memory for the page session; a failed
//! fetch is indistinguishable from missing data by design.

use std::sync::Arc;

pub mod chunks;
pub mod error;
pub mod manifest;
pub mod media;
pub mod pager;
pub mod record;
pub mod storage;

pub use chunks::{ChunkFetcher, ChunkStore, CHUNK_SIZE};
pub use error::{Result, VaultError};
pub use manifest::Manifest;
pub use media::{MediaResolver, UrlSource};
pub use pager::{Pager, SentinelWatcher, PAGE_SIZE};
pub use record::{MediaKind, MediaRef, Record};
pub use storage::{ChunkSource, StorageClient, StorageConfig};

/// Wire a chunk store and pager for one archive domain and record
/// kind, using the manifest's declared total when one exists. Without
/// a manifest the pager probes until a chunk comes back absent.
pub async fn open_archive(
  client: &StorageClient,
  domain: &str,
  kind: &str,
  page_size: usize,
) -> (Arc<ChunkStore>, Pager) {
  let manifest = client.fetch_manifest(domain).await;
  let expected_total = manifest.as_ref().and_then(|m| m.total_for(kind));
  let chunk_size = manifest.as_ref().map(|m| m.chunk_size).unwrap_or(CHUNK_SIZE);

  let source = Arc::new(client.chunk_source(domain, kind));
  let store = Arc::new(ChunkStore::with_chunk_size(source, chunk_size));
  let pager = Pager::new(store.clone(), page_size, expected_total);
  (store, pager)
}
