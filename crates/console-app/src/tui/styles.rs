//! Styles shared by every panel of the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Secondary text such as help and descriptions.
pub const HELP: Style = Style::new().fg(Color::DarkGray);

/// The selected row of a list or form.
pub const HIGHLIGHT: Style =
  Style::new().bg(Color::DarkGray).fg(Color::LightCyan).add_modifier(Modifier::BOLD);

/// Keyboard shortcuts in the help bar.
pub const KEY_HIGHLIGHT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Field labels.
pub const LABEL: Style = Style::new().fg(Color::LightBlue);

/// Regular text.
pub const NORMAL: Style = Style::new().fg(Color::Gray);

/// Panel titles and headings.
pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Inline field errors and error notices.
pub const ERROR: Style = Style::new().fg(Color::Red);

/// Success notices and the active sidebar entry.
pub const SUCCESS: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Border colour for a panel, brighter when it has focus.
pub fn border_style(focused: bool) -> Style {
  if focused {
    Style::default().fg(Color::LightBlue)
  } else {
    Style::default().fg(Color::Blue)
  }
}
