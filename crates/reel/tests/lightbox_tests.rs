use reel::{flatten_media, Key, Lightbox, NavDirection, PostCarousel, SwipeTracker};
use std::time::Duration;
use vault::{MediaKind, MediaRef, Record};

fn post(id: &str, media: &[(&str, MediaKind)]) -> Record {
  Record {
    id: id.to_string(),
    author: Some("matheus".to_string()),
    author_photo: None,
    date: "2022-03-12T10:00:00Z".to_string(),
    content: format!("post {id}"),
    media: media
      .iter()
      .map(|(uri, kind)| MediaRef { kind: *kind, uri: uri.to_string() })
      .collect(),
  }
}

fn sample_items() -> Vec<reel::MediaItem> {
  flatten_media(&[
    post("1", &[("instagram/posts/a.jpg", MediaKind::Image), ("instagram/posts/b.jpg", MediaKind::Image)]),
    post("2", &[("instagram/posts/c.mp4", MediaKind::Video)]),
  ])
}

#[test]
fn flattening_preserves_display_order_and_drops_unusable_media() {
  let records = [
    post("1", &[("instagram/posts/a.jpg", MediaKind::Image), ("", MediaKind::Image)]),
    post("2", &[("instagram/posts/b.jpg", MediaKind::Image)]),
  ];
  let items = flatten_media(&records);
  let paths: Vec<&str> = items.iter().map(|item| item.path.as_str()).collect();
  assert_eq!(paths, vec!["instagram/posts/a.jpg", "instagram/posts/b.jpg"]);
  assert_eq!(items[0].record_id, "1");
  assert_eq!(items[1].caption, "post 2");
}

#[test]
fn navigation_wraps_at_both_ends() {
  let mut lightbox = Lightbox::open(sample_items(), 2).unwrap();

  lightbox.next();
  assert_eq!(lightbox.index(), 0);
  assert_eq!(lightbox.direction(), NavDirection::Forward);

  lightbox.prev();
  assert_eq!(lightbox.index(), 2);
  assert_eq!(lightbox.direction(), NavDirection::Back);
}

#[test]
fn keyboard_drives_the_same_transitions() {
  let mut lightbox = Lightbox::open(sample_items(), 0).unwrap();

  lightbox.handle_key(Key::ArrowRight);
  assert_eq!(lightbox.index(), 1);
  lightbox.handle_key(Key::ArrowLeft);
  assert_eq!(lightbox.index(), 0);

  lightbox.handle_key(Key::Escape);
  assert!(!lightbox.is_open());
  assert_eq!(lightbox.current(), None);
}

#[test]
fn a_closed_lightbox_ignores_navigation() {
  let mut lightbox = Lightbox::open(sample_items(), 1).unwrap();
  lightbox.close();
  lightbox.next();
  lightbox.prev();
  assert_eq!(lightbox.index(), 1);
}

#[test]
fn opening_by_display_path_matches_the_grid_click() {
  let items = sample_items();
  let lightbox = Lightbox::open_at_path(items, "instagram/posts/b.jpg").unwrap();
  assert_eq!(lightbox.index(), 1);
  assert_eq!(lightbox.current().unwrap().kind, MediaKind::Image);

  assert!(Lightbox::open_at_path(sample_items(), "nope.jpg").is_none());
  assert!(Lightbox::open(sample_items(), 99).is_none());
  assert!(Lightbox::open(Vec::new(), 0).is_none());
}

#[test]
fn swipes_past_the_threshold_map_to_directions() {
  let mut swipe = SwipeTracker::new();

  swipe.touch_start(200.0);
  assert_eq!(swipe.touch_end(120.0), Some(NavDirection::Forward));

  swipe.touch_start(200.0);
  assert_eq!(swipe.touch_end(270.0), Some(NavDirection::Back));

  swipe.touch_start(200.0);
  assert_eq!(swipe.touch_end(170.0), None);

  // No touch in flight.
  assert_eq!(swipe.touch_end(0.0), None);
}

#[test]
fn swipes_navigate_like_arrows() {
  let mut lightbox = Lightbox::open(sample_items(), 0).unwrap();
  let mut swipe = SwipeTracker::new();

  swipe.touch_start(300.0);
  if let Some(direction) = swipe.touch_end(200.0) {
    lightbox.handle_swipe(direction);
  }
  assert_eq!(lightbox.index(), 1);
}

#[test]
fn lightbox_controls_fade_and_recover() {
  let mut lightbox = Lightbox::open(sample_items(), 0).unwrap();
  assert!(lightbox.controls_visible());

  lightbox.tick(Duration::from_millis(3000));
  assert!(!lightbox.controls_visible());

  lightbox.pointer_activity();
  assert!(lightbox.controls_visible());
}

#[test]
fn single_item_lists_wrap_onto_themselves() {
  let items = flatten_media(&[post("1", &[("instagram/posts/a.jpg", MediaKind::Image)])]);
  let mut lightbox = Lightbox::open(items, 0).unwrap();
  lightbox.next();
  assert_eq!(lightbox.index(), 0);
  assert_eq!(lightbox.direction(), NavDirection::Forward);
}

#[test]
fn post_carousel_is_bounded_by_the_posts_own_media() {
  let record = post(
    "1",
    &[
      ("instagram/posts/a.jpg", MediaKind::Image),
      ("instagram/posts/b.jpg", MediaKind::Image),
      ("instagram/posts/c.jpg", MediaKind::Image),
    ],
  );
  let mut carousel = PostCarousel::new(record.media.len());
  assert!(carousel.is_multi());
  assert!(carousel.next());
  assert!(carousel.next());
  assert!(!carousel.next());
  assert_eq!(carousel.index(), 2);
}
