//! Story timeline grouping.
//!
//! Stories arrive keyed by calendar day. The canonical order is
//! chronological ascending (day index 0 is the oldest day), and the
//! selector strip's newest-first ordering is a display-level reversal,
//! never a change to the indices the player navigates by.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vault::MediaKind;

/// One story: a single dated media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
  pub date: DateTime<Utc>,
  #[serde(rename = "type", default)]
  pub kind: MediaKind,
  #[serde(default)]
  pub uri: String,
}

/// All of a subject's stories posted on one calendar date, ordered by
/// timestamp ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryDay {
  pub date: NaiveDate,
  pub stories: Vec<Story>,
}

impl StoryDay {
  /// The strip thumbnail comes from the day's first story.
  pub fn preview(&self) -> Option<&Story> {
    self.stories.first()
  }
}

/// A subject's story days in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryTimeline {
  days: Vec<StoryDay>,
}

impl StoryTimeline {
  /// Build from the archive's `{ "YYYY-MM-DD": [stories] }` document.
  /// Days with unparseable keys or no stories are dropped.
  pub fn from_days(map: HashMap<String, Vec<Story>>) -> Self {
    let mut days: Vec<StoryDay> = map
      .into_iter()
      .filter_map(|(key, mut stories)| {
        let date: NaiveDate = key.parse().ok()?;
        if stories.is_empty() {
          return None;
        }
        stories.sort_by_key(|story| story.date);
        Some(StoryDay { date, stories })
      })
      .collect();
    days.sort_by_key(|day| day.date);
    Self { days }
  }

  pub fn days(&self) -> &[StoryDay] {
    &self.days
  }

  pub fn day(&self, index: usize) -> Option<&StoryDay> {
    self.days.get(index)
  }

  pub fn day_count(&self) -> usize {
    self.days.len()
  }

  /// Total stories across all days.
  pub fn story_count(&self) -> usize {
    self.days.iter().map(|day| day.stories.len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.days.is_empty()
  }

  /// Day index for a calendar date, in canonical ascending order.
  pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
    self.days.iter().position(|day| day.date == date)
  }

  /// Selector-strip order: newest day first. Display-only reversal.
  pub fn days_newest_first(&self) -> impl Iterator<Item = &StoryDay> {
    self.days.iter().rev()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn story(timestamp: &str, uri: &str) -> Story {
    Story {
      date: timestamp.parse().unwrap(),
      kind: MediaKind::Image,
      uri: uri.to_string(),
    }
  }

  fn sample() -> StoryTimeline {
    StoryTimeline::from_days(HashMap::from([
      (
        "2022-03-14".to_string(),
        vec![story("2022-03-14T20:00:00Z", "c2"), story("2022-03-14T09:00:00Z", "c1")],
      ),
      ("2022-03-12".to_string(), vec![story("2022-03-12T10:00:00Z", "a1")]),
      ("2022-03-13".to_string(), vec![story("2022-03-13T11:00:00Z", "b1")]),
    ]))
  }

  #[test]
  fn days_sort_ascending_and_stories_sort_within_a_day() {
    let timeline = sample();
    let dates: Vec<String> = timeline.days().iter().map(|d| d.date.to_string()).collect();
    assert_eq!(dates, vec!["2022-03-12", "2022-03-13", "2022-03-14"]);

    let last_day = timeline.day(2).unwrap();
    assert_eq!(last_day.stories[0].uri, "c1");
    assert_eq!(last_day.stories[1].uri, "c2");
  }

  #[test]
  fn newest_first_is_a_view_reversal() {
    let timeline = sample();
    let dates: Vec<String> =
      timeline.days_newest_first().map(|d| d.date.to_string()).collect();
    assert_eq!(dates, vec!["2022-03-14", "2022-03-13", "2022-03-12"]);
    // The canonical indices are untouched.
    assert_eq!(timeline.index_of("2022-03-12".parse().unwrap()), Some(0));
    assert_eq!(timeline.index_of("2022-03-14".parse().unwrap()), Some(2));
  }

  #[test]
  fn previews_and_stats() {
    let timeline = sample();
    assert_eq!(timeline.day_count(), 3);
    assert_eq!(timeline.story_count(), 4);
    assert_eq!(timeline.day(2).unwrap().preview().unwrap().uri, "c1");
  }

  #[test]
  fn bad_keys_and_empty_days_are_dropped() {
    let timeline = StoryTimeline::from_days(HashMap::from([
      ("not-a-date".to_string(), vec![story("2022-03-12T10:00:00Z", "x")]),
      ("2022-03-12".to_string(), Vec::new()),
    ]));
    assert!(timeline.is_empty());
    assert_eq!(timeline.index_of("2022-03-12".parse().unwrap()), None);
  }

  #[test]
  fn deserializes_the_archive_story_document() {
    let doc = r#"{
      "2022-03-12": [
        { "date": "2022-03-12T10:00:00Z", "type": "video", "uri": "instagram/stories/a.mp4" }
      ]
    }"#;
    let map: HashMap<String, Vec<Story>> = serde_json::from_str(doc).unwrap();
    let timeline = StoryTimeline::from_days(map);
    assert_eq!(timeline.day_count(), 1);
    assert_eq!(timeline.day(0).unwrap().stories[0].kind, MediaKind::Video);
  }
}
