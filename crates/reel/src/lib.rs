//! Viewer state machines for the nostalgia archive: story playback
//! across days, lightbox navigation over the flattened media list,
//! and the async tick driver that feeds them real time.

pub mod carousel;
pub mod controls;
pub mod driver;
pub mod lightbox;
pub mod player;
pub mod timeline;

pub use carousel::PostCarousel;
pub use controls::{ControlsFade, CONTROLS_TIMEOUT};
pub use driver::PlayerDriver;
pub use lightbox::{flatten_media, Key, Lightbox, MediaItem, SwipeTracker, SWIPE_THRESHOLD};
pub use player::{
  NavDirection, PlayerState, StoryPlayer, DAY_TRANSITION, STORY_DURATION, TICK_INTERVAL,
};
pub use timeline::{Story, StoryDay, StoryTimeline};
