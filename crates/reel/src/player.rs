//! Story playback state machine.
//!
//! All clocks are accumulated `tick` time, so the machine is
//! deterministic and independent of any rendering framework's
//! animation timing. The async driver feeds it real time; tests feed
//! it whatever they want.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use std::time::Duration;

use crate::controls::ControlsFade;
use crate::timeline::{Story, StoryDay, StoryTimeline};
use vault::MediaKind;

/// How long an image story stays up before auto-advancing.
pub const STORY_DURATION: Duration = Duration::from_millis(5000);
/// Length of the cross-day slide.
pub const DAY_TRANSITION: Duration = Duration::from_millis(400);
/// Cadence the driver ticks the machine at.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Direction of a navigation step; drives the entry animation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
  Forward,
  Back,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerState {
  /// Constructed but not opened yet.
  Idle,
  PlayingImage { day: usize, story: usize, elapsed: Duration },
  /// Progress for videos comes from playback position, not a timer.
  PlayingVideo { day: usize, story: usize, progress: f32 },
  /// The slide between days; navigation is ignored until it commits.
  TransitioningDay { from: usize, to: usize, direction: NavDirection, elapsed: Duration },
  Closed,
}

/// Drives one subject's story playback across days.
pub struct StoryPlayer {
  timeline: StoryTimeline,
  state: PlayerState,
  single_day: bool,
  controls: ControlsFade,
}

impl StoryPlayer {
  pub fn new(timeline: StoryTimeline) -> Self {
    Self {
      timeline,
      state: PlayerState::Idle,
      single_day: false,
      controls: ControlsFade::new(),
    }
  }

  /// Open at the first story of the given day.
  pub fn open_at(&mut self, date: NaiveDate) -> Result<()> {
    let day = self.timeline.index_of(date).ok_or_else(|| anyhow!("no stories on {date}"))?;
    self.state = self.playing_state(day, 0);
    Ok(())
  }

  /// Open restricted to one day: the cross-day slide never happens
  /// and finishing the day closes the player.
  pub fn open_single_day(&mut self, date: NaiveDate) -> Result<()> {
    self.single_day = true;
    self.open_at(date)
  }

  pub fn state(&self) -> PlayerState {
    self.state
  }

  pub fn is_closed(&self) -> bool {
    matches!(self.state, PlayerState::Closed)
  }

  pub fn is_transitioning(&self) -> bool {
    matches!(self.state, PlayerState::TransitioningDay { .. })
  }

  /// The day and story currently playing. `None` while idle, closed
  /// or mid-slide.
  pub fn current(&self) -> Option<(&StoryDay, &Story)> {
    let (day, story) = self.position()?;
    let current_day = self.timeline.day(day)?;
    let current_story = current_day.stories.get(story)?;
    Some((current_day, current_story))
  }

  pub fn current_uri(&self) -> Option<&str> {
    self.current().map(|(_, story)| story.uri.as_str())
  }

  /// Progress of the current story, 0 to 100.
  pub fn progress(&self) -> f32 {
    match self.state {
      PlayerState::PlayingImage { elapsed, .. } => {
        let ratio = elapsed.as_secs_f32() / STORY_DURATION.as_secs_f32();
        (ratio * 100.0).min(100.0)
      }
      PlayerState::PlayingVideo { progress, .. } => progress,
      _ => 0.0,
    }
  }

  /// Advance to the next story, sliding into the next day when the
  /// current one is done, closing past the end of the last day.
  /// Ignored while a day slide is in flight.
  pub fn next_story(&mut self) {
    let Some((day, story)) = self.position() else {
      return;
    };
    let stories_today = self.day_len(day);
    if story + 1 < stories_today {
      self.state = self.playing_state(day, story + 1);
      return;
    }
    if !self.single_day && day + 1 < self.timeline.day_count() {
      self.state = PlayerState::TransitioningDay {
        from: day,
        to: day + 1,
        direction: NavDirection::Forward,
        elapsed: Duration::ZERO,
      };
      return;
    }
    quill::debug("story playback reached the end, closing");
    self.state = PlayerState::Closed;
  }

  /// Step back to the previous story, sliding into the previous day's
  /// last story at a day boundary. A no-op at the very first story.
  /// Ignored while a day slide is in flight.
  pub fn prev_story(&mut self) {
    let Some((day, story)) = self.position() else {
      return;
    };
    if story > 0 {
      self.state = self.playing_state(day, story - 1);
      return;
    }
    if !self.single_day && day > 0 {
      self.state = PlayerState::TransitioningDay {
        from: day,
        to: day - 1,
        direction: NavDirection::Back,
        elapsed: Duration::ZERO,
      };
    }
  }

  pub fn close(&mut self) {
    self.state = PlayerState::Closed;
  }

  /// Whether navigation affordances should be shown. Cosmetic only;
  /// fading never touches playback.
  pub fn controls_visible(&self) -> bool {
    self.controls.visible()
  }

  /// Pointer movement over the viewer re-shows the controls.
  pub fn pointer_activity(&mut self) {
    self.controls.pointer_activity();
  }

  /// Advance playback clocks by `delta`. Image stories auto-advance
  /// once the story duration accumulates; a pending day slide commits
  /// once the transition duration accumulates.
  pub fn tick(&mut self, delta: Duration) {
    self.controls.tick(delta);
    match self.state {
      PlayerState::PlayingImage { day, story, elapsed } => {
        let elapsed = elapsed + delta;
        if elapsed >= STORY_DURATION {
          self.next_story();
        } else {
          self.state = PlayerState::PlayingImage { day, story, elapsed };
        }
      }
      PlayerState::TransitioningDay { from, to, direction, elapsed } => {
        let elapsed = elapsed + delta;
        if elapsed >= DAY_TRANSITION {
          self.commit_transition(to, direction);
        } else {
          self.state = PlayerState::TransitioningDay { from, to, direction, elapsed };
        }
      }
      _ => {}
    }
  }

  /// Playback-position update from the underlying media, 0 to 100.
  pub fn video_progress(&mut self, percent: f32) {
    if let PlayerState::PlayingVideo { day, story, .. } = self.state {
      self.state =
        PlayerState::PlayingVideo { day, story, progress: percent.clamp(0.0, 100.0) };
    }
  }

  /// The underlying media finished playing.
  pub fn video_ended(&mut self) {
    if matches!(self.state, PlayerState::PlayingVideo { .. }) {
      self.next_story();
    }
  }

  fn position(&self) -> Option<(usize, usize)> {
    match self.state {
      PlayerState::PlayingImage { day, story, .. }
      | PlayerState::PlayingVideo { day, story, .. } => Some((day, story)),
      _ => None,
    }
  }

  fn day_len(&self, day: usize) -> usize {
    self.timeline.day(day).map(|d| d.stories.len()).unwrap_or(0)
  }

  fn story_kind(&self, day: usize, story: usize) -> MediaKind {
    self
      .timeline
      .day(day)
      .and_then(|d| d.stories.get(story))
      .map(|s| s.kind)
      .unwrap_or(MediaKind::Image)
  }

  fn playing_state(&self, day: usize, story: usize) -> PlayerState {
    if self.story_kind(day, story).is_video() {
      PlayerState::PlayingVideo { day, story, progress: 0.0 }
    } else {
      PlayerState::PlayingImage { day, story, elapsed: Duration::ZERO }
    }
  }

  fn commit_transition(&mut self, to: usize, direction: NavDirection) {
    let story = match direction {
      NavDirection::Forward => 0,
      NavDirection::Back => self.day_len(to).saturating_sub(1),
    };
    self.state = self.playing_state(to, story);
  }
}
