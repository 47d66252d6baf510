//! Knowledge-base articles: markup, table of contents and rendering.
//!
//! An article is a title, a block of pre-rendered markup and a [`TocNode`] tree. The
//! [`ArticleRenderer`] does not parse or clean the markup. Instead every call site picks a
//! [`Markup`] variant:
//!
//! - [`Markup::trusted`]: the string is emitted untouched; the caller vouches for it.
//! - [`Markup::escaped`]: HTML-significant characters are entity-escaped, so the string shows
//!   up as literal text.
//!
//! # Examples
//!
//! ```
//! use console_core::article::{ArticleRenderer, Markup, TocNode};
//!
//! let toc = vec![TocNode::new("intro", "Intro", 1).with_child(TocNode::new("why", "Why", 2))];
//! let article = ArticleRenderer::render("Hello", &Markup::escaped("<b>hi</b>"), &toc);
//! assert_eq!(article.body, "&lt;b&gt;hi&lt;/b&gt;");
//! assert_eq!(article.toc.len(), 2);
//! ```

use super::*;

/// The bundled sample article body.
const SAMPLE_ARTICLE: &str = include_str!("../data/article.html");

/// Markup together with the caller's decision about trusting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
  /// Rendered exactly as given
  Trusted(String),
  /// Rendered with `& < > " '` replaced by entities
  Escaped(String),
}

impl Markup {
  /// Markup the caller vouches for. It reaches the output unchanged.
  pub fn trusted(markup: impl Into<String>) -> Self { Markup::Trusted(markup.into()) }

  /// Text that must not be interpreted as markup.
  pub fn escaped(text: impl Into<String>) -> Self { Markup::Escaped(text.into()) }

  /// The string to emit.
  pub fn render(&self) -> Cow<'_, str> {
    match self {
      Markup::Trusted(markup) => Cow::Borrowed(markup),
      Markup::Escaped(text) => escape_html(text),
    }
  }
}

/// Replaces HTML-significant characters with entities, borrowing when there are none.
pub fn escape_html(text: &str) -> Cow<'_, str> {
  if !text.contains(['&', '<', '>', '"', '\'']) {
    return Cow::Borrowed(text);
  }
  let mut escaped = String::with_capacity(text.len() + 16);
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(c),
    }
  }
  Cow::Owned(escaped)
}

/// How configured article content is wrapped before rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupPolicy {
  /// Wrap content with [`Markup::trusted`]
  #[default]
  Trusted,
  /// Wrap content with [`Markup::escaped`]
  Escaped,
}

impl MarkupPolicy {
  /// Wraps `content` according to this policy.
  pub fn wrap(self, content: impl Into<String>) -> Markup {
    match self {
      MarkupPolicy::Trusted => Markup::trusted(content),
      MarkupPolicy::Escaped => Markup::escaped(content),
    }
  }
}

/// One entry of a table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
  /// Anchor id of the heading
  pub id:       String,
  /// Heading text
  pub title:    String,
  /// Nesting level, starting at 1
  pub level:    usize,
  /// Sub-headings in document order
  #[serde(default)]
  pub children: Vec<TocNode>,
}

impl TocNode {
  /// Creates a leaf node. A level of zero is raised to one.
  pub fn new(id: impl Into<String>, title: impl Into<String>, level: usize) -> Self {
    Self { id: id.into(), title: title.into(), level: level.max(1), children: Vec::new() }
  }

  /// Appends a child node.
  pub fn with_child(mut self, child: TocNode) -> Self {
    self.children.push(child);
    self
  }
}

/// A table-of-contents line ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
  /// Link target, `#` followed by the node id
  pub anchor: String,
  /// Heading text
  pub title:  String,
  /// Indentation steps, `level - 1`; a level of zero is not indented
  pub indent: usize,
  /// Whether no later entry shares this entry's parent
  pub last:   bool,
}

/// Flattens `nodes` depth-first into display lines.
pub fn flatten_toc(nodes: &[TocNode]) -> Vec<TocEntry> {
  let mut entries = Vec::new();
  push_entries(nodes, &mut entries);
  entries
}

/// Recursive step of [`flatten_toc`].
fn push_entries(nodes: &[TocNode], entries: &mut Vec<TocEntry>) {
  for (i, node) in nodes.iter().enumerate() {
    entries.push(TocEntry {
      anchor: format!("#{}", node.id),
      title:  node.title.clone(),
      indent: node.level.saturating_sub(1),
      last:   i + 1 == nodes.len(),
    });
    push_entries(&node.children, entries);
  }
}

/// One step of the breadcrumb trail above an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
  /// Text of the step
  pub label: String,
  /// Where the step links to; `None` for the current page
  pub route: Option<Route>,
}

/// Everything a front end needs to show an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArticle {
  /// Article title, shown as given
  pub title:       String,
  /// Article body after applying the caller's [`Markup`] choice
  pub body:        String,
  /// Heading above the table of contents
  pub toc_heading: String,
  /// Table of contents, depth-first
  pub toc:         Vec<TocEntry>,
  /// Dashboard › Knowledge Base › title
  pub breadcrumbs: Vec<Crumb>,
}

/// Renders articles. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleRenderer;

impl ArticleRenderer {
  /// Renders a title, a markup block and a table of contents.
  pub fn render(title: &str, markup: &Markup, toc: &[TocNode]) -> RenderedArticle {
    RenderedArticle {
      title:       title.to_string(),
      body:        markup.render().into_owned(),
      toc_heading: format!("On this page: {title}"),
      toc:         flatten_toc(toc),
      breadcrumbs: vec![
        Crumb { label: "Dashboard".into(), route: Some(Route::Dashboard) },
        Crumb { label: "Knowledge Base".into(), route: Some(Route::KnowledgeBase) },
        Crumb { label: title.to_string(), route: None },
      ],
    }
  }

  /// Renders an article supplied by a content provider.
  pub fn render_content(content: &ArticleContent, policy: MarkupPolicy) -> RenderedArticle {
    Self::render(&content.title, &policy.wrap(content.body.as_str()), &content.toc)
  }
}

/// Raw article content as a provider supplies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
  /// Article title
  pub title: String,
  /// Pre-rendered markup, not yet wrapped in a [`Markup`] choice
  pub body:  String,
  /// Table of contents
  pub toc:   Vec<TocNode>,
}

/// Supplies the article shown on the knowledge-base page.
pub trait ArticleSource {
  /// Loads the article.
  ///
  /// # Errors
  ///
  /// Returns an error if the content cannot be produced.
  fn article(&self) -> Result<ArticleContent>;
}

/// The one hardcoded article of the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleArticle;

impl ArticleSource for SampleArticle {
  fn article(&self) -> Result<ArticleContent> {
    Ok(ArticleContent {
      title: "Understanding the Console App Interface".into(),
      body:  SAMPLE_ARTICLE.into(),
      toc:   vec![
        TocNode::new("dashboard-section", "1. Main Dashboard", 1),
        TocNode::new("kb-view-section", "2. Knowledge Base View", 1).with_child(TocNode::new(
          "reading-article-subsection",
          "2.1. Reading an Article",
          2,
        )),
        TocNode::new("libraries-section", "3. Libraries", 1),
        TocNode::new("creating-content-section", "4. Creating Content", 1),
      ],
    })
  }
}
