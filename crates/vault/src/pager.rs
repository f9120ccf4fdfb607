//! Incremental visibility over a growing record set.
//!
//! The pager exposes a visible prefix of the chunk store's merged
//! records and grows it one page at a time as a sentinel element
//! scrolls into view. When the window already covers everything known
//! and the archive may hold more, it pulls the next chunk and reveals
//! the first page of it.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::chunks::ChunkStore;
use crate::record::Record;

/// Records revealed per advance step.
pub const PAGE_SIZE: usize = 20;

/// Growing visible window over a `ChunkStore`.
pub struct Pager {
  store: Arc<ChunkStore>,
  page_size: usize,
  /// Declared total from the manifest, when one exists. Without it
  /// the pager probes until a chunk fetch comes back absent.
  expected_total: Option<usize>,
  visible: AtomicUsize,
  advancing: AtomicBool,
}

impl Pager {
  pub fn new(store: Arc<ChunkStore>, page_size: usize, expected_total: Option<usize>) -> Self {
    Self {
      store,
      page_size: page_size.max(1),
      expected_total,
      visible: AtomicUsize::new(0),
      advancing: AtomicBool::new(false),
    }
  }

  /// Load the first chunk and reveal the first page.
  pub async fn init(&self) {
    self.store.load_chunk(0).await;
    let known = self.store.known_count().await;
    self.visible.store(known.min(self.page_size), Ordering::SeqCst);
  }

  /// How many records the view should currently show. Monotonically
  /// non-decreasing and never above the known record count.
  pub fn visible_count(&self) -> usize {
    self.visible.load(Ordering::SeqCst)
  }

  pub async fn visible_records(&self) -> Vec<Record> {
    self.store.record_prefix(self.visible_count()).await
  }

  /// Whether everything the archive can yield is already visible.
  pub async fn is_complete(&self) -> bool {
    let known = self.store.known_count().await;
    self.visible_count() >= known && !self.may_have_more(known).await
  }

  /// One sentinel-visibility step. Returns whether anything new was
  /// revealed. Re-entrant calls while a step (and possibly a chunk
  /// fetch) is running return immediately without touching the store.
  pub async fn advance(&self) -> bool {
    if self.advancing.swap(true, Ordering::SeqCst) {
      return false;
    }
    let advanced = self.advance_inner().await;
    self.advancing.store(false, Ordering::SeqCst);
    advanced
  }

  async fn advance_inner(&self) -> bool {
    let known = self.store.known_count().await;
    if self.reveal(known) {
      return true;
    }

    if !self.may_have_more(known).await {
      return false;
    }

    let index = self.store.next_chunk_index().await;
    if self.store.load_chunk(index).await.is_none() {
      return false;
    }

    // Reveal the first page of the freshly merged chunk.
    let known = self.store.known_count().await;
    self.reveal(known)
  }

  fn reveal(&self, known: usize) -> bool {
    let visible = self.visible_count();
    if visible >= known {
      return false;
    }
    let next = (visible + self.page_size).min(known);
    self.visible.store(next, Ordering::SeqCst);
    true
  }

  async fn may_have_more(&self, known: usize) -> bool {
    if self.store.is_exhausted().await {
      return false;
    }
    match self.expected_total {
      Some(total) => known < total,
      None => true,
    }
  }
}

/// Drives a pager from sentinel-visibility events.
///
/// `start` spawns the task that serializes events into `advance`
/// calls; stopping (or dropping) the handle aborts the task so a
/// dismantled view can never trigger another fetch.
pub struct SentinelWatcher {
  events: mpsc::UnboundedSender<()>,
  task: JoinHandle<()>,
}

impl SentinelWatcher {
  pub fn start(pager: Arc<Pager>) -> Self {
    let (events, mut receiver) = mpsc::unbounded_channel::<()>();
    let task = tokio::spawn(async move {
      while receiver.recv().await.is_some() {
        pager.advance().await;
      }
    });
    Self { events, task }
  }

  /// Report that the sentinel element intersected the viewport.
  pub fn sentinel_visible(&self) {
    let _ = self.events.send(());
  }

  pub fn stop(&self) {
    self.task.abort();
  }
}

impl Drop for SentinelWatcher {
  fn drop(&mut self) {
    self.task.abort();
  }
}
