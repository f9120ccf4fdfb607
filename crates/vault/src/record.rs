//! Archive record model.
//!
//! One `Record` is a single historical item (scrap, update, tweet,
//! post). The archive exports are not uniform about field names, so
//! the serde model absorbs the variants via aliases: `text` folds into
//! `content`, `name` into `author`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Media classification carried by archive records and stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
  Image,
  Video,
  AnimatedGif,
}

impl Default for MediaKind {
  fn default() -> Self {
    MediaKind::Image
  }
}

impl MediaKind {
  /// Whether the media plays back over time (videos and animated
  /// gifs share thumbnails and playback handling).
  pub fn is_video(&self) -> bool {
    matches!(self, MediaKind::Video | MediaKind::AnimatedGif)
  }
}

impl<'de> Deserialize<'de> for MediaKind {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    // Older exports carry kinds we never classified; render them as
    // plain images rather than rejecting the whole chunk.
    let name = String::deserialize(deserializer)?;
    Ok(match name.as_str() {
      "video" => MediaKind::Video,
      "animated_gif" => MediaKind::AnimatedGif,
      _ => MediaKind::Image,
    })
  }
}

/// One media attachment on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
  #[serde(rename = "type", default)]
  pub kind: MediaKind,
  /// Storage path, or a bare filename for exports that key media by
  /// record id.
  #[serde(alias = "filename", default)]
  pub uri: String,
}

/// One historical post/message/update item. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub id: String,
  #[serde(default, alias = "name")]
  pub author: Option<String>,
  #[serde(default, alias = "authorPhoto")]
  pub author_photo: Option<String>,
  /// ISO-8601 timestamp as exported.
  pub date: String,
  #[serde(default, alias = "text")]
  pub content: String,
  #[serde(default)]
  pub media: Vec<MediaRef>,
}

impl Record {
  /// Parsed timestamp, if the exported date is well-formed.
  pub fn timestamp(&self) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&self.date).ok().map(|dt| dt.with_timezone(&Utc))
  }

  /// Calendar day the record was posted on.
  pub fn day_key(&self) -> Option<NaiveDate> {
    self.timestamp().map(|dt| dt.date_naive())
  }

  /// Compact age label relative to `now`: "now", "N min", "N h",
  /// "N d", falling back to the full date after a week.
  pub fn relative_date(&self, now: DateTime<Utc>) -> String {
    let Some(posted) = self.timestamp() else {
      return self.date.clone();
    };
    let seconds = (now - posted).num_seconds().max(0);
    if seconds < 60 {
      "now".to_string()
    } else if seconds < 3600 {
      format!("{} min", seconds / 60)
    } else if seconds < 86_400 {
      format!("{} h", seconds / 3600)
    } else if seconds < 604_800 {
      format!("{} d", seconds / 86_400)
    } else {
      posted.format("%-d %b %Y").to_string()
    }
  }

  pub fn has_media(&self) -> bool {
    !self.media.is_empty()
  }
}
