//! Routing: the static path table, redirects and the shared layout.
//!
//! The console has exactly five pages. [`Route::resolve`] maps a path onto one of them, or
//! onto [`Route::NotFound`] for anything else. There are no guards: every page is reachable
//! from every other page, and the login form always "succeeds".
//!
//! # Examples
//!
//! ```
//! use console_core::route::Route;
//!
//! assert_eq!(Route::resolve("/libraries"), Route::Libraries);
//! assert_eq!(Route::resolve("/dashboard/"), Route::Dashboard);
//! assert_eq!(Route::resolve("/nope"), Route::NotFound("/nope".into()));
//! assert_eq!(Route::CreateKnowledgeBase.path(), "/create-knowledge-base");
//! ```

use super::*;

pub mod layout;
pub mod shell;

pub use self::{
  layout::{Dashboard, DashboardCard, Header, Layout, NavItem},
  shell::{Page, RouteShell, Screen},
};

/// The routing table, in the order pages are declared.
static ROUTES: [(&str, Route); 5] = [
  ("/", Route::Login),
  ("/create-knowledge-base", Route::CreateKnowledgeBase),
  ("/dashboard", Route::Dashboard),
  ("/knowledge-base", Route::KnowledgeBase),
  ("/libraries", Route::Libraries),
];

/// A page of the console.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
  /// `/`
  Login,
  /// `/create-knowledge-base`
  CreateKnowledgeBase,
  /// `/dashboard`
  Dashboard,
  /// `/knowledge-base`
  KnowledgeBase,
  /// `/libraries`
  Libraries,
  /// Any other path, kept as requested
  NotFound(String),
}

impl Route {
  /// Maps a path onto a route.
  ///
  /// One trailing slash is ignored, as is anything from the first `?` or `#` on.
  pub fn resolve(path: &str) -> Route {
    let bare = path.split(['?', '#']).next().unwrap_or_default();
    let bare = match bare.strip_suffix('/') {
      Some(stripped) if !stripped.is_empty() => stripped,
      _ => bare,
    };
    let route = ROUTES
      .iter()
      .find(|(candidate, _)| *candidate == bare)
      .map(|(_, route)| route.clone())
      .unwrap_or_else(|| Route::NotFound(path.to_string()));
    trace!(path, ?route, "resolved");
    route
  }

  /// The five real pages, in table order.
  pub fn pages() -> impl Iterator<Item = &'static Route> { ROUTES.iter().map(|(_, route)| route) }

  /// The path of this route. A not-found route returns the path that was requested.
  pub fn path(&self) -> &str {
    match self {
      Route::NotFound(path) => path,
      route => ROUTES
        .iter()
        .find(|(_, candidate)| candidate == route)
        .map(|(path, _)| *path)
        .unwrap_or_default(),
    }
  }

  /// Page title shown in the header.
  pub fn title(&self) -> &'static str {
    match self {
      Route::Login => "Login",
      Route::CreateKnowledgeBase => "Create Knowledge Base Article",
      Route::Dashboard => "Dashboard",
      Route::KnowledgeBase => "Knowledge Base",
      Route::Libraries => "Libraries",
      Route::NotFound(_) => "Page Not Found",
    }
  }

  /// Whether the page is shown with the navigation sidebar.
  pub fn has_sidebar(&self) -> bool { !matches!(self, Route::Login | Route::NotFound(_)) }
}

impl Display for Route {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.path()) }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
  /// Something worked
  Success,
  /// Neutral information
  Info,
  /// Something failed and the user may retry
  Error,
}

/// A short message shown after an action, like a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  /// Severity
  pub level:       NoticeLevel,
  /// Main line
  pub title:       String,
  /// Optional second line
  pub description: Option<String>,
}

impl Notice {
  /// Creates a notice of the given level.
  pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
    Self { level, title: title.into(), description: None }
  }

  /// A success notice.
  pub fn success(title: impl Into<String>) -> Self { Self::new(NoticeLevel::Success, title) }

  /// An error notice.
  pub fn error(title: impl Into<String>) -> Self { Self::new(NoticeLevel::Error, title) }

  /// Adds a second line.
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }
}

/// Where to go after an action, and what to tell the user on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
  /// Destination
  pub to:     Route,
  /// Message to show on the destination page
  pub notice: Option<Notice>,
}

impl Redirect {
  /// A redirect without a notice.
  pub fn to(route: Route) -> Self { Self { to: route, notice: None } }

  /// Attaches a notice.
  pub fn with_notice(mut self, notice: Notice) -> Self {
    self.notice = Some(notice);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_page_round_trips() {
    for route in Route::pages() {
      assert_eq!(&Route::resolve(route.path()), route);
    }
    assert_eq!(Route::pages().count(), 5);
  }

  #[test]
  fn unknown_paths_keep_what_was_asked() {
    let route = Route::resolve("/settings");
    assert_eq!(route, Route::NotFound("/settings".into()));
    assert_eq!(route.path(), "/settings");
    assert_eq!(route.title(), "Page Not Found");
    assert_eq!(Route::resolve(""), Route::NotFound(String::new()));
    assert_eq!(Route::resolve("/dashboard/extra"), Route::NotFound("/dashboard/extra".into()));
  }

  #[test]
  fn query_and_trailing_slash_are_ignored() {
    assert_eq!(Route::resolve("/libraries/?page=2"), Route::Libraries);
    assert_eq!(Route::resolve("/knowledge-base#libraries-section"), Route::KnowledgeBase);
    assert_eq!(Route::resolve("/"), Route::Login);
    assert_eq!(Route::resolve("//"), Route::NotFound("//".into()));
  }

  #[test]
  fn sidebar_only_inside_the_app() {
    assert!(!Route::Login.has_sidebar());
    assert!(!Route::NotFound("/x".into()).has_sidebar());
    assert!(Route::Libraries.has_sidebar());
  }

  #[test]
  fn redirect_builder() {
    let redirect = Redirect::to(Route::KnowledgeBase)
      .with_notice(Notice::success("Saved").with_description("Title: X"));
    assert_eq!(redirect.to.to_string(), "/knowledge-base");
    assert_eq!(redirect.notice.unwrap().description.as_deref(), Some("Title: X"));
  }
}
