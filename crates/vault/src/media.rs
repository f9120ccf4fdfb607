//! Media path normalization and URL resolution.
//!
//! Archive exports reference media a few different ways: absolute
//! URLs, storage paths, legacy local paths from when the data lived in
//! the site bundle, and bare filenames keyed by record id. Everything
//! funnels through `normalize_path` before hitting the resolver cache
//! so one piece of media always has one cache entry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::record::MediaRef;

/// Fixed thumb served when an author photo is missing from the dump.
pub const PLACEHOLDER_THUMB: &str = "orkut/user_thumb_medium.jpg";

/// Resolves a storage path to a downloadable URL.
///
/// The collaborator behind the resolver cache; an error here is cached
/// as "unresolvable" and never retried.
#[async_trait]
pub trait UrlSource: Send + Sync {
  async fn lookup(&self, path: &str) -> Result<String>;
}

/// Normalize a media reference into its canonical storage path.
///
/// Absolute URLs pass through untouched. Legacy `/src/data/` prefixes
/// and leading slashes are stripped, and old export layouts are
/// remapped onto the storage bucket structure.
pub fn normalize_path(path: &str) -> String {
  if path.is_empty() || path.starts_with("http") {
    return path.to_string();
  }

  let mut clean = path;
  for prefix in ["/src/data/", "src/data/"] {
    if let Some(rest) = clean.strip_prefix(prefix) {
      clean = rest;
      break;
    }
  }
  let clean = clean.strip_prefix('/').unwrap_or(clean);

  if clean.contains("user_thumb_medium") {
    return PLACEHOLDER_THUMB.to_string();
  }

  let clean = clean.strip_prefix("imgs/").unwrap_or(clean);

  if clean.starts_with("tweets_media/") || clean.starts_with("profile_media/") {
    return format!("twitter/data/{clean}");
  }
  if clean.starts_with("community/") || clean.starts_with("profile/") || clean.starts_with("fotos/")
  {
    return format!("orkut/{clean}");
  }

  clean.to_string()
}

/// Storage path for a post's media at original quality.
///
/// Bare filenames come from exports that key media by record id; they
/// get the `{id}-{filename}` layout the media directories use.
pub fn post_media_path(post_id: &str, media: &MediaRef) -> String {
  if media.uri.is_empty() {
    return String::new();
  }
  if media.uri.contains('/') || media.uri.starts_with("http") {
    return normalize_path(&media.uri);
  }
  normalize_path(&format!("tweets_media/{post_id}-{}", media.uri))
}

/// Storage path for a post's media at feed quality. Videos use their
/// generated still thumbnails.
pub fn post_thumb_path(post_id: &str, media: &MediaRef) -> String {
  if media.uri.is_empty() {
    return String::new();
  }
  if media.uri.contains('/') || media.uri.starts_with("http") {
    return normalize_path(&media.uri);
  }
  if media.kind.is_video() {
    let base = media.uri.rsplit_once('.').map(|(base, _)| base).unwrap_or(media.uri.as_str());
    return normalize_path(&format!("tweets_media/thumbs/{post_id}-{base}.jpg"));
  }
  normalize_path(&format!("tweets_media/medium/{post_id}-{}", media.uri))
}

/// Storage path for a post's media at lightbox quality. Videos have no
/// medium rendition and fall back to the original.
pub fn post_medium_path(post_id: &str, media: &MediaRef) -> String {
  if media.uri.is_empty() {
    return String::new();
  }
  if media.kind.is_video() {
    return post_media_path(post_id, media);
  }
  if media.uri.contains('/') || media.uri.starts_with("http") {
    return normalize_path(&media.uri);
  }
  normalize_path(&format!("tweets_media/medium/{post_id}-{}", media.uri))
}

/// Session-wide URL cache over a `UrlSource`.
///
/// One lookup per unique normalized path for the life of the session.
/// A failed lookup caches the empty-string sentinel ("fetched, got
/// nothing") and is never retried.
pub struct MediaResolver {
  source: Arc<dyn UrlSource>,
  cache: Mutex<HashMap<String, String>>,
}

impl MediaResolver {
  pub fn new(source: Arc<dyn UrlSource>) -> Self {
    Self { source, cache: Mutex::new(HashMap::new()) }
  }

  /// Resolve a media path to a download URL, or the empty string when
  /// it cannot be resolved.
  pub async fn resolve(&self, path: &str) -> String {
    if path.is_empty() {
      return String::new();
    }
    if path.starts_with("http") {
      return path.to_string();
    }

    let key = normalize_path(path);
    let mut cache = self.cache.lock().await;
    if let Some(url) = cache.get(&key) {
      return url.clone();
    }

    let url = match self.source.lookup(&key).await {
      Ok(url) => url,
      Err(err) => {
        quill::warn(&format!("media resolution failed for {key}: {err}"));
        String::new()
      }
    };
    cache.insert(key, url.clone());
    url
  }

  /// How many paths have been resolved (or failed) so far.
  pub async fn cached_count(&self) -> usize {
    self.cache.lock().await.len()
  }
}
