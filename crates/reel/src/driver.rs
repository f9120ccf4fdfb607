//! Async tick loop for a shared story player.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::player::{StoryPlayer, TICK_INTERVAL};
use vault::MediaResolver;

/// Owns the background task that advances a player's clocks.
///
/// Stopping (or dropping) the handle aborts the task, so a dismantled
/// view can never be advanced by a stale timer. When a resolver is
/// supplied, the driver warms its cache for each story as playback
/// reaches it.
pub struct PlayerDriver {
  task: JoinHandle<()>,
}

impl PlayerDriver {
  pub fn start(player: Arc<Mutex<StoryPlayer>>, resolver: Option<Arc<MediaResolver>>) -> Self {
    let task = tokio::spawn(async move {
      let mut interval = tokio::time::interval(TICK_INTERVAL);
      let mut warmed: Option<String> = None;
      loop {
        interval.tick().await;
        let current_uri = {
          let mut player = player.lock().await;
          if player.is_closed() {
            break;
          }
          player.tick(TICK_INTERVAL);
          player.current_uri().map(str::to_string)
        };

        let (Some(resolver), Some(uri)) = (resolver.as_ref(), current_uri) else {
          continue;
        };
        if warmed.as_deref() != Some(uri.as_str()) {
          // A failed resolution is cached too; playback just shows
          // the placeholder and the timer still advances past it.
          resolver.resolve(&uri).await;
          warmed = Some(uri);
        }
      }
    });
    Self { task }
  }

  pub fn stop(&self) {
    self.task.abort();
  }
}

impl Drop for PlayerDriver {
  fn drop(&mut self) {
    self.task.abort();
  }
}
