//! Chunked record loading with at-most-once fetches.
//!
//! The archive persists each kind of record as numbered chunk
//! documents; chunk `i` holds the records at absolute indices
//! `[i * chunk_size, (i + 1) * chunk_size)`. The store merges fetched
//! chunks into one logical ordered set by placing every record at its
//! absolute index, so global order holds no matter which fetch
//! completes first.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::manifest::DEFAULT_CHUNK_SIZE;
use crate::record::Record;

pub const CHUNK_SIZE: usize = DEFAULT_CHUNK_SIZE;

/// Fetches one numbered chunk document.
///
/// `None` means the chunk does not exist or the fetch failed; callers
/// treat both as the end of the archive. Implementations must not
/// panic on transport errors.
#[async_trait]
pub trait ChunkFetcher: Send + Sync {
  async fn fetch_chunk(&self, index: usize) -> Option<Vec<Record>>;
}

struct ChunkState {
  /// Records keyed by absolute index; sparse until chunks land.
  records: BTreeMap<usize, Record>,
  /// Indices we attempted, successful or not. Never re-fetched.
  attempted: HashSet<usize>,
  /// Indices that came back with records.
  present: HashSet<usize>,
  /// Ids already merged; later duplicates are dropped.
  seen_ids: HashSet<String>,
  exhausted: bool,
}

/// In-memory store of merged archive chunks for one record kind.
///
/// Lives for the page session; nothing is persisted. Entries are only
/// ever added, never mutated, so readers need no coordination beyond
/// the store's own lock.
pub struct ChunkStore {
  fetcher: Arc<dyn ChunkFetcher>,
  chunk_size: usize,
  state: Mutex<ChunkState>,
}

impl ChunkStore {
  pub fn new(fetcher: Arc<dyn ChunkFetcher>) -> Self {
    Self::with_chunk_size(fetcher, CHUNK_SIZE)
  }

  pub fn with_chunk_size(fetcher: Arc<dyn ChunkFetcher>, chunk_size: usize) -> Self {
    Self {
      fetcher,
      chunk_size: chunk_size.max(1),
      state: Mutex::new(ChunkState {
        records: BTreeMap::new(),
        attempted: HashSet::new(),
        present: HashSet::new(),
        seen_ids: HashSet::new(),
        exhausted: false,
      }),
    }
  }

  pub fn chunk_size(&self) -> usize {
    self.chunk_size
  }

  /// Load chunk `index`, fetching it at most once for the session.
  ///
  /// Returns the chunk's records, or `None` when the chunk is absent
  /// or the fetch failed; both permanently end pagination at that
  /// index. The state lock is held across the fetch, so concurrent
  /// calls for the same index share one network request and a call
  /// for a different index waits its turn instead of being dropped.
  pub async fn load_chunk(&self, index: usize) -> Option<Vec<Record>> {
    let mut state = self.state.lock().await;
    if state.attempted.contains(&index) {
      if state.present.contains(&index) {
        return Some(self.chunk_slice(&state, index));
      }
      return None;
    }

    let fetched = self.fetcher.fetch_chunk(index).await;
    state.attempted.insert(index);

    let records = match fetched {
      Some(records) if !records.is_empty() => records,
      _ => {
        // An empty chunk and a failed fetch both read as "no more
        // data"; pagination stops here for the rest of the session.
        state.exhausted = true;
        quill::info(&format!("chunk {index} unavailable, treating as end of archive"));
        return None;
      }
    };

    state.present.insert(index);
    let base = index * self.chunk_size;
    let mut merged = Vec::with_capacity(records.len());
    for (offset, record) in records.into_iter().enumerate() {
      if !state.seen_ids.insert(record.id.clone()) {
        continue;
      }
      state.records.insert(base + offset, record.clone());
      merged.push(record);
    }
    quill::debug(&format!("merged chunk {index}: {} records", merged.len()));
    Some(merged)
  }

  fn chunk_slice(&self, state: &ChunkState, index: usize) -> Vec<Record> {
    let base = index * self.chunk_size;
    state.records.range(base..base + self.chunk_size).map(|(_, r)| r.clone()).collect()
  }

  /// Count of records merged so far.
  pub async fn known_count(&self) -> usize {
    self.state.lock().await.records.len()
  }

  /// All merged records in absolute-index order. Positions for chunks
  /// that never loaded are simply absent.
  pub async fn merged_records(&self) -> Vec<Record> {
    self.state.lock().await.records.values().cloned().collect()
  }

  /// The first `count` merged records in order.
  pub async fn record_prefix(&self, count: usize) -> Vec<Record> {
    self.state.lock().await.records.values().take(count).cloned().collect()
  }

  /// Whether a fetch has already come back absent; no chunk past that
  /// point will ever be requested again this session.
  pub async fn is_exhausted(&self) -> bool {
    self.state.lock().await.exhausted
  }

  pub async fn has_loaded(&self, index: usize) -> bool {
    self.state.lock().await.present.contains(&index)
  }

  /// The lowest chunk index not yet attempted.
  pub async fn next_chunk_index(&self) -> usize {
    let state = self.state.lock().await;
    state.attempted.iter().max().map(|index| index + 1).unwrap_or(0)
  }
}
