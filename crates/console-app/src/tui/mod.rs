//! Terminal User Interface for the console app.
//!
//! The TUI shows one page at a time inside the shared layout: header on top, the sidebar on
//! the left (except on the login and not-found pages), the page in the middle and the footer
//! with a help bar at the bottom. It uses `ratatui` for rendering and `crossterm` for terminal
//! control and input.
//!
//! # Navigation
//!
//! - Tab: switch focus between sidebar and page
//! - Up/k, Down/j: move the selection or scroll
//! - Enter: open the selected page, edit the selected field, follow a dashboard card
//! - `/`: search the library, Left/h and Right/l: change library page
//! - s: submit the current form, c: cancel article creation
//! - q: quit, after confirmation
//!
//! The TUI is enabled through the `tui` feature. When enabled, it becomes the default
//! interface when no command is specified.

use std::io;

use crossterm::{
  event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
  execute,
  terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use self::{state::UIState, ui::UIDrawer};
use super::*;

pub mod state;
pub mod styles;
pub mod ui;

/// Runs the Terminal User Interface, starting on the login page.
///
/// The terminal is restored before returning, whether the loop ended normally or not.
///
/// # Errors
///
/// Returns a [`ConsoleAppError`] if the first page cannot be built or the terminal fails.
pub async fn run(shell: RouteShell) -> Result<()> {
  let mut app = UIState::new(shell)?;

  enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend)?;

  let result = event_loop(&mut terminal, &mut app).await;

  disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
  terminal.show_cursor()?;

  result
}

/// Draws, reads keys and runs submits until the user confirms exit.
async fn event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut UIState,
) -> Result<()> {
  loop {
    if app.needs_redraw {
      terminal.draw(|f| UIDrawer::new(f, app).draw())?;
      app.needs_redraw = false;
    }

    if app.take_submit_request() {
      app.submit().await;
      continue;
    }

    if event::poll(std::time::Duration::from_millis(5))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press =>
          if app.handle_input(key.code) {
            info!("leaving the TUI");
            return Ok(());
          },
        Event::Resize(..) => app.needs_redraw = true,
        _ => {},
      }
    }
  }
}
