//! Small leveled logging library for the archive viewer crates.
//!
//! Everything goes to stderr so library output never mixes with data
//! on stdout. The active level comes from the `QUILL_LEVEL` environment
//! variable (`verbose`, `debug`, `info`, `warn`, `error`); unset or
//! unrecognized values mean `info`.

use chrono::Local;
use colored::*;

/// Log severity, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  Verbose,
  Debug,
  Info,
  Warn,
  Error,
}

impl Level {
  /// Parse a level name; anything unrecognized falls back to `Info`.
  pub fn parse(name: &str) -> Level {
    match name.to_lowercase().as_str() {
      "verbose" => Level::Verbose,
      "debug" => Level::Debug,
      "warn" => Level::Warn,
      "error" => Level::Error,
      _ => Level::Info,
    }
  }

  fn active() -> Level {
    match std::env::var("QUILL_LEVEL") {
      Ok(value) => Level::parse(&value),
      Err(_) => Level::Info,
    }
  }
}

fn enabled(level: Level) -> bool {
  level >= Level::active()
}

fn prefix(color: Color, tag: &str) -> String {
  format!("[{}]{:<width$}", tag.color(color).bold(), "", width = 5usize.saturating_sub(tag.len()))
}

fn emit(level: Level, color: Color, tag: &str, message: &str) {
  if !enabled(level) {
    return;
  }
  let prefix = prefix(color, tag);
  for line in message.lines() {
    eprintln!("{prefix} {line}");
  }
}

pub fn verbose(message: &str) {
  emit(Level::Verbose, Color::Cyan, "verb", message);
}

pub fn debug(message: &str) {
  emit(Level::Debug, Color::Magenta, "debug", message);
}

/// General information about normal operation.
pub fn info(message: &str) {
  emit(Level::Info, Color::Blue, "info", message);
}

/// Something needs attention but the operation continues.
pub fn warn(message: &str) {
  emit(Level::Warn, Color::Yellow, "warn", message);
}

/// Something went wrong.
pub fn error(message: &str) {
  emit(Level::Error, Color::Red, "error", message);
}

/// An operation completed successfully.
pub fn success(message: &str) {
  emit(Level::Info, Color::Green, "done", message);
}

fn emit_event(level: Level, color: Color, message: &str) {
  if !enabled(level) {
    return;
  }
  let timestamp = Local::now().format("%H:%M:%S").to_string();
  let prefix = format!("[{}] [{}]", "event".color(color).bold(), timestamp.cyan());
  for line in message.lines() {
    eprintln!("{prefix} {line}");
  }
}

/// Timestamped info event.
pub fn event_info(message: &str) {
  emit_event(Level::Info, Color::Blue, message);
}

/// Timestamped warning event.
pub fn event_warn(message: &str) {
  emit_event(Level::Warn, Color::Yellow, message);
}

/// Timestamped error event.
pub fn event_error(message: &str) {
  emit_event(Level::Error, Color::Red, message);
}
