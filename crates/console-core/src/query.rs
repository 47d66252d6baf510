//! Search, filtering and pagination over a library.
//!
//! [`ListQueryEngine`] owns the view state of a library browser: the search term and the
//! current page. Everything else is derived on demand from the source items:
//!
//! - the **filtered set**: items whose title, description or space-joined tags contain the
//!   term, ignoring case;
//! - the **page count**: `ceil(filtered / page_size)`, never less than one;
//! - the **visible slice**: the filtered items on the current page.
//!
//! The page always stays within `1..=page_count`. Changing the term goes back to page one and
//! out-of-range page requests are ignored.
//!
//! # Examples
//!
//! ```
//! use console_core::{library::SampleLibrary, query::{ListQueryEngine, PageMarker}};
//!
//! # fn example() -> Result<(), console_core::error::ConsoleError> {
//! let mut engine = ListQueryEngine::from_provider(&SampleLibrary)?;
//! assert_eq!(engine.page_count(), 2);
//! assert!(engine.set_page(2));
//! assert_eq!(engine.visible_items().len(), 2);
//!
//! engine.set_search_term("MARKETING");
//! assert_eq!(engine.page(), 1);
//! assert_eq!(engine.filtered_count(), 2);
//! assert!(!engine.set_page(2));
//! # Ok(())
//! # }
//! ```

use super::*;
use crate::library::{LibraryItem, LibraryProvider};

/// Items per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One entry of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
  /// A link to a page
  Page {
    /// 1-indexed page number
    number:  usize,
    /// Whether this is the page being shown
    current: bool,
  },
  /// A gap of one or more hidden pages
  Ellipsis,
}

/// The bounded set of page links to show for `current` out of `page_count` pages.
///
/// Page one and the last page are always present, as is every page within one of `current`.
/// A [`PageMarker::Ellipsis`] stands in for each run of hidden pages, so the output is
/// ascending, duplicate-free and never holds two ellipses in a row. `current` is clamped into
/// `1..=page_count` and a `page_count` of zero is treated as one.
pub fn page_window(current: usize, page_count: usize) -> Vec<PageMarker> {
  let last = page_count.max(1);
  let current = current.clamp(1, last);

  let mut markers = Vec::new();
  let mut previous: Option<usize> = None;
  for number in 1..=last {
    if number != 1 && number != last && number.abs_diff(current) > 1 {
      continue;
    }
    if previous.is_some_and(|previous| number - previous > 1) {
      markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page { number, current: number == current });
    previous = Some(number);
  }
  markers
}

/// What to show when the current page has no items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
  /// Main message
  pub message: &'static str,
  /// Extra hint, present while a search term is active
  pub hint:    Option<&'static str>,
}

/// Search term and page of a library browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
  /// Current search term, possibly empty
  pub term: String,
  /// Current 1-indexed page
  pub page: usize,
}

impl Default for QueryState {
  fn default() -> Self { Self { term: String::new(), page: 1 } }
}

/// The search/filter/paginate engine behind the library browser.
#[derive(Debug, Clone)]
pub struct ListQueryEngine {
  /// Source items in display order
  items:     Vec<LibraryItem>,
  /// Term and page
  state:     QueryState,
  /// Items per page, at least one
  page_size: usize,
}

impl ListQueryEngine {
  /// Creates an engine over `items` with the default page size.
  pub fn new(items: Vec<LibraryItem>) -> Self {
    Self { items, state: QueryState::default(), page_size: DEFAULT_PAGE_SIZE }
  }

  /// Creates an engine over everything `provider` loads.
  ///
  /// # Errors
  ///
  /// Propagates any error from the provider.
  pub fn from_provider<P: LibraryProvider + ?Sized>(provider: &P) -> Result<Self> {
    Ok(Self::new(provider.load()?))
  }

  /// Sets the number of items per page. Zero is treated as one.
  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size.max(1);
    self.state.page = 1;
    self
  }

  /// Every source item, unfiltered.
  pub fn items(&self) -> &[LibraryItem] { &self.items }

  /// Current term and page.
  pub fn state(&self) -> &QueryState { &self.state }

  /// Current search term.
  pub fn search_term(&self) -> &str { &self.state.term }

  /// Current 1-indexed page.
  pub fn page(&self) -> usize { self.state.page }

  /// Items per page.
  pub fn page_size(&self) -> usize { self.page_size }

  /// Replaces the search term and goes back to page one.
  pub fn set_search_term(&mut self, term: impl Into<String>) {
    self.state.term = term.into();
    self.state.page = 1;
    debug!(term = %self.state.term, matches = self.filtered_count(), "search term changed");
  }

  /// Empties the search term and goes back to page one.
  pub fn clear_search(&mut self) { self.set_search_term(String::new()) }

  /// Moves to page `page` if it exists. Returns whether the page changed hands; requests
  /// outside `1..=page_count` are ignored.
  pub fn set_page(&mut self, page: usize) -> bool {
    if (1..=self.page_count()).contains(&page) {
      self.state.page = page;
      trace!(page, "page changed");
      true
    } else {
      trace!(page, page_count = self.page_count(), "ignored out-of-range page");
      false
    }
  }

  /// Whether there is a page before the current one.
  pub fn has_previous(&self) -> bool { self.state.page > 1 }

  /// Whether there is a page after the current one.
  pub fn has_next(&self) -> bool { self.state.page < self.page_count() }

  /// Moves one page back, if possible.
  pub fn previous_page(&mut self) -> bool {
    self.state.page > 1 && self.set_page(self.state.page - 1)
  }

  /// Moves one page forward, if possible.
  pub fn next_page(&mut self) -> bool { self.set_page(self.state.page + 1) }

  /// Every item matching the search term, in source order.
  pub fn filtered(&self) -> Vec<&LibraryItem> {
    let needle = self.state.term.to_lowercase();
    self.items.iter().filter(|item| item.matches(&needle)).collect()
  }

  /// Number of items matching the search term.
  pub fn filtered_count(&self) -> usize { self.filtered().len() }

  /// Number of pages, at least one even when nothing matches.
  pub fn page_count(&self) -> usize { self.filtered_count().div_ceil(self.page_size).max(1) }

  /// Matching items on the current page, at most [`Self::page_size`] of them.
  pub fn visible_items(&self) -> Vec<&LibraryItem> {
    let start = (self.state.page - 1) * self.page_size;
    self.filtered().into_iter().skip(start).take(self.page_size).collect()
  }

  /// Page links for the pagination control.
  pub fn page_window(&self) -> Vec<PageMarker> { page_window(self.state.page, self.page_count()) }

  /// Whether a pagination control is worth showing.
  pub fn shows_pagination(&self) -> bool { self.page_count() > 1 }

  /// Message for an empty page, or `None` when there is something to show.
  pub fn empty_state(&self) -> Option<EmptyState> {
    if self.visible_items().is_empty() {
      Some(EmptyState {
        message: "No library items found.",
        hint:    (!self.state.term.is_empty()).then_some("Try adjusting your search terms."),
      })
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::library::SampleLibrary;

  fn engine() -> ListQueryEngine { ListQueryEngine::from_provider(&SampleLibrary).unwrap() }

  /// Compact rendering of a window: pages as numbers, `*` for the current one, `…` for gaps.
  fn show(markers: &[PageMarker]) -> String {
    markers
      .iter()
      .map(|marker| match marker {
        PageMarker::Page { number, current: true } => format!("{number}*"),
        PageMarker::Page { number, .. } => number.to_string(),
        PageMarker::Ellipsis => "…".to_string(),
      })
      .collect::<Vec<_>>()
      .join(" ")
  }

  #[test]
  fn window_for_small_page_counts() {
    assert_eq!(show(&page_window(1, 0)), "1*");
    assert_eq!(show(&page_window(1, 1)), "1*");
    assert_eq!(show(&page_window(1, 2)), "1* 2");
    assert_eq!(show(&page_window(2, 2)), "1 2*");
    assert_eq!(show(&page_window(1, 3)), "1* 2 3");
    assert_eq!(show(&page_window(2, 3)), "1 2* 3");
    assert_eq!(show(&page_window(3, 3)), "1 2 3*");
  }

  #[test]
  fn window_for_larger_page_counts() {
    assert_eq!(show(&page_window(1, 4)), "1* 2 … 4");
    assert_eq!(show(&page_window(3, 4)), "1 2 3* 4");
    assert_eq!(show(&page_window(1, 10)), "1* 2 … 10");
    assert_eq!(show(&page_window(4, 10)), "1 … 3 4* 5 … 10");
    assert_eq!(show(&page_window(3, 10)), "1 2 3* 4 … 10");
    assert_eq!(show(&page_window(9, 10)), "1 … 8 9* 10");
    assert_eq!(show(&page_window(10, 10)), "1 … 9 10*");
  }

  #[test]
  fn window_clamps_current_page() {
    assert_eq!(page_window(0, 3), page_window(1, 3));
    assert_eq!(page_window(99, 5), page_window(5, 5));
  }

  #[test]
  fn sample_set_has_two_pages() {
    let mut engine = engine();
    assert_eq!(engine.page_count(), 2);
    assert_eq!(engine.visible_items().len(), 6);
    assert!(engine.shows_pagination());
    assert!(engine.next_page());
    let ids: Vec<_> = engine.visible_items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["7", "8"]);
    assert!(!engine.has_next());
    assert!(!engine.next_page());
    assert!(engine.previous_page());
    assert!(!engine.previous_page());
  }

  #[test]
  #[traced_test]
  fn search_resets_page() {
    let mut engine = engine();
    engine.set_page(2);
    engine.set_search_term("hr");
    assert_eq!(engine.page(), 1);
    assert!(logs_contain("search term changed"));
  }

  #[test]
  fn no_matches_still_has_one_page() {
    let mut engine = engine();
    engine.set_search_term("zzz-nothing");
    assert_eq!(engine.filtered_count(), 0);
    assert_eq!(engine.page_count(), 1);
    assert!(engine.visible_items().is_empty());
    assert!(!engine.shows_pagination());
    let empty = engine.empty_state().unwrap();
    assert_eq!(empty.message, "No library items found.");
    assert_eq!(empty.hint, Some("Try adjusting your search terms."));
  }

  #[test]
  fn empty_library_has_no_hint_without_search() {
    let engine = ListQueryEngine::new(Vec::new());
    assert_eq!(engine.page_count(), 1);
    assert_eq!(engine.empty_state().unwrap().hint, None);
  }

  #[test]
  fn out_of_range_pages_are_ignored() {
    let mut engine = engine();
    assert!(!engine.set_page(0));
    assert!(!engine.set_page(3));
    assert_eq!(engine.page(), 1);
    assert!(engine.set_page(2));
    assert_eq!(engine.page(), 2);
  }

  #[test]
  fn page_size_is_configurable() {
    let mut engine = engine().with_page_size(3);
    assert_eq!(engine.page_count(), 3);
    assert!(engine.set_page(3));
    assert_eq!(engine.visible_items().len(), 2);
    assert_eq!(engine.clone().with_page_size(0).page_size(), 1);
    engine.clear_search();
    assert_eq!(engine.page(), 1);
  }
}
