//! The chrome shared by every page and the dashboard contents.

use super::*;

/// Application name shown in the header.
pub const APP_TITLE: &str = "Console App";

/// Text of the empty recent-activity panel.
pub const NO_RECENT_ACTIVITY: &str = "No recent activity to display. Check back later!";

/// Top bar of every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
  /// Application name
  pub title:      String,
  /// Title of the page being shown
  pub page_title: String,
  /// Where the application name links to
  pub home:       Route,
}

/// One sidebar link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
  /// Link text
  pub label:  &'static str,
  /// Single-glyph icon
  pub icon:   &'static str,
  /// Destination
  pub route:  Route,
  /// Whether this link points at the page being shown
  pub active: bool,
}

/// Header, optional sidebar and footer around a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  /// Top bar
  pub header:  Header,
  /// Navigation, absent on the login and not-found pages
  pub sidebar: Option<Vec<NavItem>>,
  /// Copyright line
  pub footer:  String,
}

impl Layout {
  /// The sidebar entries in display order: label, icon, destination.
  const NAV: [(&'static str, &'static str, Route); 5] = [
    ("Dashboard", "⌂", Route::Dashboard),
    ("Knowledge Base", "📖", Route::KnowledgeBase),
    ("Create KB Article", "➕", Route::CreateKnowledgeBase),
    ("Libraries", "📚", Route::Libraries),
    ("Logout", "⎋", Route::Login),
  ];

  /// Builds the chrome for `route`, with `year` in the footer.
  pub fn for_route(route: &Route, year: i32) -> Self {
    let sidebar = route.has_sidebar().then(|| {
      Self::NAV
        .into_iter()
        .map(|(label, icon, target)| NavItem { label, icon, active: &target == route, route: target })
        .collect()
    });

    Self {
      header: Header {
        title:      APP_TITLE.to_string(),
        page_title: route.title().to_string(),
        home:       Route::Dashboard,
      },
      sidebar,
      footer: format!("© {year} Experience Studio Console. All rights reserved."),
    }
  }

  /// The sidebar entry for the page being shown, if any.
  pub fn active_item(&self) -> Option<&NavItem> {
    self.sidebar.as_ref()?.iter().find(|item| item.active)
  }
}

/// A dashboard card linking to another page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCard {
  /// Card heading
  pub title:       &'static str,
  /// One-line summary under the heading
  pub description: &'static str,
  /// Body text
  pub body:        &'static str,
  /// Button text
  pub action:      &'static str,
  /// Button destination
  pub route:       Route,
  /// Whether the card is visually emphasised
  pub highlight:   bool,
}

/// Contents of the dashboard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
  /// Welcome heading
  pub heading:         &'static str,
  /// Text under the heading
  pub intro:           &'static str,
  /// The three navigation cards
  pub cards:           Vec<DashboardCard>,
  /// Heading of the activity panel
  pub activity_title:  &'static str,
  /// Activity entries, always empty for now
  pub recent_activity: Vec<String>,
}

impl Dashboard {
  /// Text to show in the activity panel.
  pub fn activity_text(&self) -> String {
    if self.recent_activity.is_empty() {
      NO_RECENT_ACTIVITY.to_string()
    } else {
      self.recent_activity.join("\n")
    }
  }
}

impl Default for Dashboard {
  fn default() -> Self {
    Self {
      heading:         "Welcome to Your Console",
      intro:           "Manage your knowledge bases and libraries efficiently.",
      cards:           vec![
        DashboardCard {
          title:       "Knowledge Bases",
          description: "Access, create, and manage your knowledge base articles.",
          body:        "Keep your information organized and easily accessible.",
          action:      "View Knowledge Bases",
          route:       Route::KnowledgeBase,
          highlight:   false,
        },
        DashboardCard {
          title:       "Libraries",
          description: "Explore and manage your digital asset libraries.",
          body:        "Store and categorize documents, images, videos, and more.",
          action:      "Go to Libraries",
          route:       Route::Libraries,
          highlight:   false,
        },
        DashboardCard {
          title:       "Quick Actions",
          description: "Start creating new content right away.",
          body:        "More actions coming soon...",
          action:      "Create New Knowledge Base",
          route:       Route::CreateKnowledgeBase,
          highlight:   true,
        },
      ],
      activity_title:  "Recent Activity",
      recent_activity: Vec::new(),
    }
  }
}
