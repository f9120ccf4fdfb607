//! Full-screen media browsing over the flattened archive.
//!
//! The lightbox navigates a flat list of every post's media in display
//! order, wrapping at both ends. Keyboard, click affordances and
//! horizontal swipes all funnel into the same two transitions, tagged
//! with a direction that only the entry animation cares about.

use crate::controls::ControlsFade;
use crate::player::NavDirection;
use std::time::Duration;
use vault::{media, MediaKind, Record};

/// Keys the lightbox responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  ArrowLeft,
  ArrowRight,
  Escape,
}

/// Minimum horizontal travel for a swipe to count, in pixels.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// One entry in the flattened media list.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
  pub record_id: String,
  pub kind: MediaKind,
  /// Display-quality path the lightbox shows.
  pub path: String,
  /// Original-quality path.
  pub full_path: String,
  pub thumb_path: String,
  pub caption: String,
  pub date: String,
}

/// Flatten records' media in display order, dropping anything without
/// a usable path.
pub fn flatten_media(records: &[Record]) -> Vec<MediaItem> {
  records
    .iter()
    .flat_map(|record| {
      record.media.iter().filter_map(move |attachment| {
        let path = media::post_medium_path(&record.id, attachment);
        if path.is_empty() {
          return None;
        }
        Some(MediaItem {
          record_id: record.id.clone(),
          kind: attachment.kind,
          path,
          full_path: media::post_media_path(&record.id, attachment),
          thumb_path: media::post_thumb_path(&record.id, attachment),
          caption: record.content.clone(),
          date: record.date.clone(),
        })
      })
    })
    .collect()
}

/// Modal media browser over a flat item list.
pub struct Lightbox {
  items: Vec<MediaItem>,
  index: usize,
  direction: NavDirection,
  controls: ControlsFade,
  open: bool,
}

impl Lightbox {
  /// Open at an index. `None` when the list is empty or the index is
  /// out of range.
  pub fn open(items: Vec<MediaItem>, index: usize) -> Option<Self> {
    if index >= items.len() {
      return None;
    }
    Some(Self {
      items,
      index,
      direction: NavDirection::Forward,
      controls: ControlsFade::new(),
      open: true,
    })
  }

  /// Open at the item whose display path matches, the way a grid
  /// click addresses its media.
  pub fn open_at_path(items: Vec<MediaItem>, path: &str) -> Option<Self> {
    let index = items.iter().position(|item| item.path == path)?;
    Self::open(items, index)
  }

  pub fn is_open(&self) -> bool {
    self.open
  }

  pub fn index(&self) -> usize {
    self.index
  }

  /// Direction of the last transition, for the entry animation.
  pub fn direction(&self) -> NavDirection {
    self.direction
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn current(&self) -> Option<&MediaItem> {
    if !self.open {
      return None;
    }
    self.items.get(self.index)
  }

  /// Step forward, wrapping past the last item.
  pub fn next(&mut self) {
    if !self.open || self.items.is_empty() {
      return;
    }
    self.index = (self.index + 1) % self.items.len();
    self.direction = NavDirection::Forward;
  }

  /// Step back, wrapping before the first item.
  pub fn prev(&mut self) {
    if !self.open || self.items.is_empty() {
      return;
    }
    self.index = (self.index + self.items.len() - 1) % self.items.len();
    self.direction = NavDirection::Back;
  }

  pub fn close(&mut self) {
    self.open = false;
  }

  pub fn handle_key(&mut self, key: Key) {
    match key {
      Key::ArrowRight => self.next(),
      Key::ArrowLeft => self.prev(),
      Key::Escape => self.close(),
    }
  }

  /// Apply a recognized swipe.
  pub fn handle_swipe(&mut self, direction: NavDirection) {
    match direction {
      NavDirection::Forward => self.next(),
      NavDirection::Back => self.prev(),
    }
  }

  pub fn controls_visible(&self) -> bool {
    self.controls.visible()
  }

  pub fn pointer_activity(&mut self) {
    self.controls.pointer_activity();
  }

  pub fn tick(&mut self, delta: Duration) {
    self.controls.tick(delta);
  }
}

/// Horizontal swipe recognition over touch x-coordinates.
#[derive(Debug, Default)]
pub struct SwipeTracker {
  start_x: Option<f32>,
}

impl SwipeTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn touch_start(&mut self, x: f32) {
    self.start_x = Some(x);
  }

  /// Finish a touch. Travel beyond the threshold maps leftward swipes
  /// to `Forward` and rightward swipes to `Back`.
  pub fn touch_end(&mut self, x: f32) -> Option<NavDirection> {
    let start = self.start_x.take()?;
    let travelled = start - x;
    if travelled > SWIPE_THRESHOLD {
      Some(NavDirection::Forward)
    } else if travelled < -SWIPE_THRESHOLD {
      Some(NavDirection::Back)
    } else {
      None
    }
  }
}
