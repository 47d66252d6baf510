//! Prompts and styled replies for the command line.
//!
//! Commands never print directly. They talk to a [`UserInteraction`], which lets them be driven
//! by the real terminal ([`Cli`]) or by anything else that answers prompts.

use console::Emoji;
use console_core::{
  form::{FieldKind, FormSchema},
  query::PageMarker,
};
use dialoguer::{Input, Password, Select};

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Prefix for navigation hints
pub static ARROW: &str = "→";
/// Separator between breadcrumb steps
pub static CRUMB_SEPARATOR: &str = " › ";
/// Branch character for tree structure
pub static TREE_BRANCH: &str = "├";
/// Leaf character for tree structure (end of branch)
pub static TREE_LEAF: &str = "└";
/// Continuation line for tree structure
pub static CONTINUE_PREFIX: &str = "│  ";
/// Marker for the active sidebar entry
pub static ACTIVE_MARKER: Emoji<'static, 'static> = Emoji("◀ ", "< ");

/// Something a command wants to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// A whole page inside its layout
  Screen(&'a Screen),
  /// A form with its current values and errors
  Form(&'a FormSchema, &'a FormState),
  /// Field messages from a rejected submit
  FieldErrors(&'a FieldErrors),
  /// A rendered article
  Article(&'a RenderedArticle),
  /// A toast-like message
  Notice(&'a Notice),
  /// Where the user would be sent next
  Redirect(&'a Redirect),
  /// Plain information line
  Info(&'a str),
}

/// The seam between commands and whoever answers them.
pub trait UserInteraction {
  /// Asks for a line of text.
  fn prompt(&self, message: &str) -> Result<String>;
  /// Asks for a secret without echoing it.
  fn prompt_password(&self, message: &str) -> Result<String>;
  /// Asks the user to pick one of `options`, returning its index.
  fn select(&self, message: &str, options: &[&str]) -> Result<usize>;
  /// Shows something to the user.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn prompt(&self, message: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(String::new());
    }
    Ok(
      Input::<String>::new()
        .with_prompt(format!("{PROMPT_PREFIX}{message}"))
        .allow_empty(true)
        .interact_text()?,
    )
  }

  fn prompt_password(&self, message: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(String::new());
    }
    Ok(Password::new().with_prompt(format!("{PROMPT_PREFIX}{message}")).interact()?)
  }

  fn select(&self, message: &str, options: &[&str]) -> Result<usize> {
    if self.accept_defaults {
      return Ok(0);
    }
    Ok(Select::new().with_prompt(message).items(options).default(0).interact()?)
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Screen(screen) => print_screen(screen),
      ResponseContent::Form(schema, state) => print_form(schema, state),
      ResponseContent::FieldErrors(errors) =>
        for (field, message) in errors {
          println!("{} {}: {}", style(ERROR_PREFIX).red(), style(field).yellow(), message);
        },
      ResponseContent::Article(article) => print_article(article),
      ResponseContent::Notice(notice) => print_notice(notice),
      ResponseContent::Redirect(redirect) =>
        println!("{} {}", style(ARROW).cyan(), style(redirect.to.path()).bold()),
      ResponseContent::Info(message) => println!("{} {message}", style(INFO_PREFIX).blue()),
    }
    Ok(())
  }
}

/// Prints a page between its header and footer.
fn print_screen(screen: &Screen) {
  print_chrome_top(&screen.layout);
  match &screen.page {
    Page::Login(form) => print_form(form.schema(), &form.snapshot()),
    Page::CreateArticle(form) => {
      print_form(form.schema(), &form.snapshot());
      println!("  {} Cancel {ARROW} /dashboard", style("[c]").dim());
    },
    Page::Dashboard(dashboard) => print_dashboard(dashboard),
    Page::KnowledgeBase(article) => print_article(article),
    Page::Libraries(engine) => print_library(engine),
    Page::NotFound { path } => {
      println!("{} Page not found: {}", style(ERROR_PREFIX).red(), style(path).yellow());
      println!("  Return to {}", style("/dashboard").bold());
    },
  }
  println!();
  println!("{}", style(&screen.layout.footer).dim());
}

/// Prints the header and, when present, the sidebar.
fn print_chrome_top(layout: &Layout) {
  println!(
    "{}{CRUMB_SEPARATOR}{}",
    style(&layout.header.title).cyan().bold(),
    style(&layout.header.page_title).bold()
  );
  if let Some(sidebar) = &layout.sidebar {
    for (i, item) in sidebar.iter().enumerate() {
      let branch = if i + 1 == sidebar.len() { TREE_LEAF } else { TREE_BRANCH };
      let label = format!("{} {}", item.icon, item.label);
      if item.active {
        println!("{branch} {} {ACTIVE_MARKER}", style(label).green().bold());
      } else {
        println!("{branch} {label}");
      }
    }
  }
  println!();
}

/// Prints every field of a form with its value and error.
fn print_form(schema: &FormSchema, state: &FormState) {
  println!("{}", style(&schema.title).bold());
  if !schema.description.is_empty() {
    println!("{}", style(&schema.description).dim());
  }
  for field in &schema.fields {
    let value = state.values.get(&field.name).unwrap_or_default();
    let shown = match &field.kind {
      _ if value.is_empty() => style(field.placeholder.as_deref().unwrap_or("")).dim().to_string(),
      kind if kind.is_masked() => "•".repeat(value.chars().count()),
      FieldKind::Select { options } => options
        .iter()
        .find(|option| option.value == value)
        .map_or_else(|| value.to_string(), |option| option.label.clone()),
      _ => value.to_string(),
    };
    println!("  {}: {shown}", style(&field.label).cyan());
    if let Some(error) = state.errors.get(&field.name) {
      println!("  {CONTINUE_PREFIX}{} {error}", style(ERROR_PREFIX).red());
    } else if let Some(description) = &field.description {
      println!("  {CONTINUE_PREFIX}{}", style(description).dim());
    }
  }
  let button = if state.submitting { &schema.busy_label } else { &schema.submit_label };
  println!("  [{}]", style(button).bold());
}

/// Prints the dashboard cards and recent activity.
fn print_dashboard(dashboard: &Dashboard) {
  println!("{}", style(dashboard.heading).bold());
  println!("{}", dashboard.intro);
  println!();
  for card in &dashboard.cards {
    let title = if card.highlight {
      style(card.title).blue().bold()
    } else {
      style(card.title).bold()
    };
    println!("{TREE_BRANCH} {title}: {}", card.description);
    println!("{CONTINUE_PREFIX}{}", style(card.body).dim());
    println!("{TREE_LEAF} {} {ARROW} {}", card.action, style(card.route.path()).bold());
  }
  println!();
  println!("{}", style(dashboard.activity_title).bold());
  println!("  {}", dashboard.activity_text());
}

/// Prints the visible page of a library browser and its pagination control.
fn print_library(engine: &ListQueryEngine) {
  if !engine.search_term().is_empty() {
    println!("{} Search: {}", style(INFO_PREFIX).blue(), style(engine.search_term()).yellow());
  }
  println!(
    "Showing {} of {} items (page {} of {})",
    engine.visible_items().len(),
    engine.filtered_count(),
    engine.page(),
    engine.page_count()
  );
  println!();

  if let Some(empty) = engine.empty_state() {
    println!("{} {}", style(INFO_PREFIX).blue(), empty.message);
    if let Some(hint) = empty.hint {
      println!("  {}", style(hint).dim());
    }
    return;
  }

  for item in engine.visible_items() {
    let look = item.kind.presentation();
    println!("{} {} {}", look.icon, style(&item.title).bold(), style(format!("[{}]", look.label)).dim());
    println!("{CONTINUE_PREFIX}{}", item.description);
    if !item.metadata.is_empty() {
      println!("{CONTINUE_PREFIX}{}", style(item.metadata.join(" · ")).dim());
    }
    if !item.tags.is_empty() {
      let tags: Vec<_> = item.tags.iter().map(|tag| format!("#{tag}")).collect();
      println!("{CONTINUE_PREFIX}{}", style(tags.join(" ")).cyan());
    }
    if let Some(date) = item.date_added {
      let author = item.author.as_deref().map(|author| format!(" by {author}")).unwrap_or_default();
      println!("{TREE_LEAF} Added {date}{author}");
    }
  }

  if engine.shows_pagination() {
    println!();
    println!("{}", pagination_line(engine));
  }
}

/// The pagination control as one line: `« 1 … 3 [4] 5 … 10 »`.
pub fn pagination_line(engine: &ListQueryEngine) -> String {
  let mut parts = Vec::new();
  if engine.has_previous() {
    parts.push("«".to_string());
  }
  for marker in engine.page_window() {
    parts.push(match marker {
      PageMarker::Page { number, current: true } => format!("[{number}]"),
      PageMarker::Page { number, .. } => number.to_string(),
      PageMarker::Ellipsis => "…".to_string(),
    });
  }
  if engine.has_next() {
    parts.push("»".to_string());
  }
  parts.join(" ")
}

/// Prints an article with its breadcrumbs and table of contents.
fn print_article(article: &RenderedArticle) {
  let crumbs: Vec<_> = article.breadcrumbs.iter().map(|crumb| crumb.label.as_str()).collect();
  println!("{}", style(crumbs.join(CRUMB_SEPARATOR)).dim());
  println!("{}", style(&article.title).bold());
  println!();
  println!("{}", style(&article.toc_heading).cyan());
  for entry in &article.toc {
    let branch = if entry.last { TREE_LEAF } else { TREE_BRANCH };
    let indent = CONTINUE_PREFIX.repeat(entry.indent);
    println!("{indent}{branch} {} {}", entry.title, style(&entry.anchor).dim());
  }
  println!();
  let rule = "─".repeat(article.toc_heading.chars().count().max(20));
  println!("{}", style(rule).dim());
  println!("{}", article.body.trim_end());
}

/// Prints a notice with a prefix matching its level.
fn print_notice(notice: &Notice) {
  let prefix = match notice.level {
    NoticeLevel::Success => style(SUCCESS_PREFIX).green(),
    NoticeLevel::Info => style(INFO_PREFIX).blue(),
    NoticeLevel::Error => style(ERROR_PREFIX).red(),
  };
  println!("{prefix} {}", notice.title);
  if let Some(description) = &notice.description {
    println!("  {description}");
  }
}
