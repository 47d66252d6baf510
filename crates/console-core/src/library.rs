//! Library items and the providers that supply them.
//!
//! A library is an ordered list of [`LibraryItem`]s: documents, videos, images and other
//! assets, each tagged with an [`ItemKind`]. Items are immutable once loaded. Where they come
//! from is abstracted behind [`LibraryProvider`]:
//!
//! - [`SampleLibrary`]: the fixed eight-item set bundled with the crate
//! - [`JsonLibrary`]: any JSON file with the same shape
//!
//! # Examples
//!
//! ```no_run
//! use console_core::library::{JsonLibrary, LibraryProvider, SampleLibrary};
//!
//! # fn example() -> Result<(), console_core::error::ConsoleError> {
//! let items = SampleLibrary.load()?;
//! assert_eq!(items.len(), 8);
//!
//! let custom = JsonLibrary::new("assets.json").load()?;
//! for item in custom {
//!   let look = item.kind.presentation();
//!   println!("{} {} ({})", look.icon, item.title, look.label);
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

/// The bundled sample library.
const SAMPLE_LIBRARY: &str = include_str!("../data/library.json");

/// Category of a library item.
///
/// Any tag not listed here deserialises as [`ItemKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
  /// Text documents such as reports and plans
  Document,
  /// Video recordings
  Video,
  /// Pictures and photo sets
  Image,
  /// Audio recordings
  Audio,
  /// Links to external resources
  Link,
  /// Compressed bundles of older material
  Archive,
  /// Curated groups of other items
  Collection,
  /// Anything else
  #[serde(other)]
  Unknown,
}

/// How an [`ItemKind`] is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
  /// Single-glyph icon
  pub icon:  &'static str,
  /// Lowercase badge text
  pub label: &'static str,
}

impl ItemKind {
  /// Every kind, in declaration order.
  pub const ALL: [ItemKind; 8] = [
    ItemKind::Document,
    ItemKind::Video,
    ItemKind::Image,
    ItemKind::Audio,
    ItemKind::Link,
    ItemKind::Archive,
    ItemKind::Collection,
    ItemKind::Unknown,
  ];

  /// Icon and label for this kind.
  pub const fn presentation(self) -> Presentation {
    let (icon, label) = match self {
      ItemKind::Document => ("📄", "document"),
      ItemKind::Video => ("🎬", "video"),
      ItemKind::Image => ("🖼", "image"),
      ItemKind::Audio => ("🎵", "audio"),
      ItemKind::Link => ("🔗", "link"),
      ItemKind::Archive => ("🗄", "archive"),
      ItemKind::Collection => ("⭐", "collection"),
      ItemKind::Unknown => ("❓", "unknown"),
    };
    Presentation { icon, label }
  }
}

impl Display for ItemKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.presentation().label)
  }
}

/// One entry of a library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryItem {
  /// Unique, stable identifier
  pub id:          String,
  /// Category of the item
  pub kind:        ItemKind,
  /// Display title
  pub title:       String,
  /// One-line summary
  pub description: String,
  /// Reference to a preview image
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub thumbnail:   Option<String>,
  /// Free-text detail lines such as format and size
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub metadata:    Vec<String>,
  /// Free-text tags
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags:        Vec<String>,
  /// When the item was added, as an ISO `YYYY-MM-DD` date
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_added:  Option<NaiveDate>,
  /// Who added the item
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub author:      Option<String>,
}

impl LibraryItem {
  /// Whether the title, description or space-joined tags contain `needle`.
  ///
  /// `needle` must already be lowercase; the item's text is lowercased here.
  pub fn matches(&self, needle: &str) -> bool {
    needle.is_empty()
      || self.title.to_lowercase().contains(needle)
      || self.description.to_lowercase().contains(needle)
      || self.tags.join(" ").to_lowercase().contains(needle)
  }
}

/// Supplies the ordered item collection a library browser works on.
pub trait LibraryProvider {
  /// Loads every item, in display order.
  ///
  /// # Errors
  ///
  /// Returns an error if the underlying data cannot be read or is invalid.
  fn load(&self) -> Result<Vec<LibraryItem>>;
}

/// Parses a JSON array of items and checks that ids are unique.
///
/// # Errors
///
/// Returns [`ConsoleError::Json`] for malformed input and [`ConsoleError::Library`] when an id
/// appears twice.
pub fn parse_library(json: &str) -> Result<Vec<LibraryItem>> {
  let items: Vec<LibraryItem> = serde_json::from_str(json)?;
  let mut seen = HashSet::new();
  for item in &items {
    if !seen.insert(item.id.as_str()) {
      return Err(ConsoleError::Library(format!("duplicate item id \"{}\"", item.id)));
    }
  }
  debug!(count = items.len(), "library parsed");
  Ok(items)
}

/// The fixed eight-item sample set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleLibrary;

impl LibraryProvider for SampleLibrary {
  fn load(&self) -> Result<Vec<LibraryItem>> { parse_library(SAMPLE_LIBRARY) }
}

/// A library read from a JSON file on every load.
#[derive(Debug, Clone)]
pub struct JsonLibrary {
  /// Location of the JSON array
  path: PathBuf,
}

impl JsonLibrary {
  /// Creates a provider for the file at `path`.
  pub fn new(path: impl AsRef<Path>) -> Self { Self { path: path.as_ref().to_path_buf() } }

  /// The file this provider reads.
  pub fn path(&self) -> &Path { &self.path }
}

impl LibraryProvider for JsonLibrary {
  fn load(&self) -> Result<Vec<LibraryItem>> {
    debug!(path = %self.path.display(), "loading library");
    let json = std::fs::read_to_string(&self.path)?;
    parse_library(&json)
  }
}

impl LibraryProvider for Vec<LibraryItem> {
  fn load(&self) -> Result<Vec<LibraryItem>> { Ok(self.clone()) }
}
