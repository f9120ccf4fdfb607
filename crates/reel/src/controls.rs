//! Pointer-idle fade for viewer controls.

use std::time::Duration;

/// Inactivity before navigation affordances fade out.
pub const CONTROLS_TIMEOUT: Duration = Duration::from_millis(3000);

/// Whether navigation affordances should currently be shown.
///
/// Purely cosmetic: fading never touches playback state.
#[derive(Debug, Clone)]
pub struct ControlsFade {
  visible: bool,
  idle: Duration,
}

impl Default for ControlsFade {
  fn default() -> Self {
    Self::new()
  }
}

impl ControlsFade {
  /// Controls start visible, as on open.
  pub fn new() -> Self {
    Self { visible: true, idle: Duration::ZERO }
  }

  pub fn visible(&self) -> bool {
    self.visible
  }

  /// Any pointer movement re-shows the controls and restarts the fade.
  pub fn pointer_activity(&mut self) {
    self.visible = true;
    self.idle = Duration::ZERO;
  }

  /// Tapping the media surface toggles instead of resetting.
  pub fn toggle(&mut self) {
    if self.visible {
      self.visible = false;
    } else {
      self.pointer_activity();
    }
  }

  /// The pointer left the surface: hide immediately.
  pub fn hide(&mut self) {
    self.visible = false;
  }

  pub fn tick(&mut self, delta: Duration) {
    if !self.visible {
      return;
    }
    self.idle += delta;
    if self.idle >= CONTROLS_TIMEOUT {
      self.visible = false;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fades_after_the_timeout() {
    let mut controls = ControlsFade::new();
    assert!(controls.visible());
    controls.tick(Duration::from_millis(2999));
    assert!(controls.visible());
    controls.tick(Duration::from_millis(1));
    assert!(!controls.visible());
  }

  #[test]
  fn pointer_activity_restarts_the_fade() {
    let mut controls = ControlsFade::new();
    controls.tick(Duration::from_millis(2500));
    controls.pointer_activity();
    controls.tick(Duration::from_millis(2500));
    assert!(controls.visible());
    controls.tick(Duration::from_millis(500));
    assert!(!controls.visible());
  }

  #[test]
  fn toggle_flips_and_rearms() {
    let mut controls = ControlsFade::new();
    controls.toggle();
    assert!(!controls.visible());
    controls.toggle();
    assert!(controls.visible());
    controls.tick(CONTROLS_TIMEOUT);
    assert!(!controls.visible());
  }

  #[test]
  fn hidden_controls_ignore_ticks() {
    let mut controls = ControlsFade::new();
    controls.hide();
    controls.tick(Duration::from_secs(60));
    assert!(!controls.visible());
  }
}
