use proptest::prelude::*;

use super::*;

fn engine() -> ListQueryEngine { ListQueryEngine::new(sample_items()) }

fn haystack(item: &LibraryItem) -> String {
  format!("{}\n{}\n{}", item.title, item.description, item.tags.join(" ")).to_lowercase()
}

fn check_window(current: usize, page_count: usize) -> std::result::Result<(), TestCaseError> {
  let window = page_window(current, page_count);
  let numbers: Vec<usize> = window
    .iter()
    .filter_map(|marker| match marker {
      PageMarker::Page { number, .. } => Some(*number),
      PageMarker::Ellipsis => None,
    })
    .collect();

  prop_assert_eq!(numbers.first().copied(), Some(1));
  prop_assert_eq!(numbers.last().copied(), Some(page_count.max(1)));
  prop_assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
  prop_assert!(window.windows(2).all(|pair| pair != [PageMarker::Ellipsis, PageMarker::Ellipsis]));
  prop_assert!(!matches!(window.first(), Some(PageMarker::Ellipsis)));
  prop_assert!(!matches!(window.last(), Some(PageMarker::Ellipsis)));

  let current = current.clamp(1, page_count.max(1));
  let marked: Vec<usize> = window
    .iter()
    .filter_map(|marker| match marker {
      PageMarker::Page { number, current: true } => Some(*number),
      _ => None,
    })
    .collect();
  prop_assert_eq!(marked, vec![current]);
  for near in current.saturating_sub(1).max(1)..=(current + 1).min(page_count.max(1)) {
    prop_assert!(numbers.contains(&near));
  }
  Ok(())
}

#[test]
fn window_holds_for_every_small_count() {
  for page_count in 0..=12 {
    for current in 0..=page_count + 1 {
      check_window(current, page_count).unwrap();
    }
  }
}

proptest! {
  #[test]
  fn window_holds_for_any_count(page_count in 0usize..500, current in 0usize..600) {
    check_window(current, page_count)?;
  }

  #[test]
  fn visible_items_match_the_term(term in "[a-zA-Z ]{0,6}") {
    let mut engine = engine();
    engine.set_search_term(term.clone());
    let needle = term.to_lowercase();
    for item in engine.visible_items() {
      prop_assert!(haystack(item).contains(&needle));
    }
    prop_assert!(engine.visible_items().len() <= engine.page_size());
    prop_assert!(engine.page_count() >= 1);
  }

  #[test]
  fn new_term_resets_the_page(page in 1usize..=2, term in "[a-z]{0,4}") {
    let mut engine = engine();
    engine.set_page(page);
    engine.set_search_term(term);
    prop_assert_eq!(engine.page(), 1);
  }

  #[test]
  fn set_page_only_accepts_existing_pages(size in 1usize..10, page in 0usize..12) {
    let mut engine = engine().with_page_size(size);
    let before = engine.page();
    let changed = engine.set_page(page);
    if (1..=engine.page_count()).contains(&page) {
      prop_assert!(changed);
      prop_assert_eq!(engine.page(), page);
    } else {
      prop_assert!(!changed);
      prop_assert_eq!(engine.page(), before);
    }
  }
}

#[test]
fn filtered_set_is_exactly_the_matching_items() {
  for term in ["", "report", "MARKETING", "alpha", "2023", "q3", "nothing-here"] {
    let mut engine = engine();
    engine.set_search_term(term);
    let needle = term.to_lowercase();
    let expected: Vec<_> =
      sample_items().into_iter().filter(|item| haystack(item).contains(&needle)).collect();
    let filtered: Vec<_> = engine.filtered().into_iter().cloned().collect();
    assert_eq!(filtered, expected, "term {term:?}");
  }
}

#[test]
fn paging_through_the_sample_set_visits_every_item_once() {
  let mut engine = engine().with_page_size(3);
  let mut seen = Vec::new();
  loop {
    seen.extend(engine.visible_items().iter().map(|item| item.id.clone()));
    if !engine.next_page() {
      break;
    }
  }
  let all: Vec<_> = sample_items().into_iter().map(|item| item.id).collect();
  assert_eq!(seen, all);
}

#[test]
fn json_library_replaces_the_sample() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("assets.json");
  std::fs::write(
    &path,
    r#"[
      {"id": "a", "kind": "audio", "title": "Town Hall", "description": "Recording", "tags": ["all-hands"]},
      {"id": "b", "kind": "document", "title": "Handbook", "description": "Policies"}
    ]"#,
  )?;

  let mut engine = ListQueryEngine::from_provider(&JsonLibrary::new(&path))?;
  assert_eq!(engine.filtered_count(), 2);
  assert!(!engine.shows_pagination());
  engine.set_search_term("all-hands");
  assert_eq!(engine.visible_items()[0].title, "Town Hall");

  let config = Config::default().with_library_path(&path);
  let shell = RouteShell::new(config)?;
  let Page::Libraries(engine) = shell.open("/libraries")?.page else {
    panic!("expected the library browser");
  };
  assert_eq!(engine.items().len(), 2);
  Ok(())
}

#[test]
fn broken_library_file_is_an_error() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("assets.json");
  std::fs::write(&path, "{ not json")?;
  let shell = RouteShell::new(Config::default().with_library_path(&path))?;
  assert!(matches!(shell.open("/libraries"), Err(ConsoleError::Json(_))));
  Ok(())
}
