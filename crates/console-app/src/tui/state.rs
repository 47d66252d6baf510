//! State management for the Terminal User Interface.
//!
//! [`UIState`] owns the current [`Screen`] and everything the TUI adds on top of it: focus,
//! selection, field editing, scrolling, the last notice and the exit dialog. Keys come in
//! through [`UIState::handle_input`]; submits are requested there and run by the event loop,
//! which awaits [`UIState::submit`].

use console_core::{
  form::{article::MockArticleStore, login::MockLogin, FieldKind, FieldSpec, FormSchema},
  route::DashboardCard,
};
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

use super::*;

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// The navigation sidebar
  Sidebar,
  /// The page itself
  Content,
}

/// The modal dialog being shown, if any.
#[derive(Debug, PartialEq, Eq)]
pub enum DialogType {
  /// No dialog is active
  None,
  /// Asking whether to quit
  ExitConfirm,
}

/// Type-erased access to a form, whatever its value object.
pub trait FormView {
  /// The schema of the form.
  fn schema(&self) -> &FormSchema;
  /// Current value of a field.
  fn value(&self, name: &str) -> Option<String>;
  /// Stores a field value and re-validates it.
  fn set_field(&self, name: &str, value: String) -> console_core::error::Result<()>;
  /// Snapshot of values, errors and the submitting flag.
  fn snapshot(&self) -> FormState;
}

impl<M: FormModel> FormView for ValidatedForm<M> {
  fn schema(&self) -> &FormSchema { ValidatedForm::schema(self) }

  fn value(&self, name: &str) -> Option<String> { ValidatedForm::value(self, name) }

  fn set_field(&self, name: &str, value: String) -> console_core::error::Result<()> {
    ValidatedForm::set_field(self, name, value)
  }

  fn snapshot(&self) -> FormState { ValidatedForm::snapshot(self) }
}

/// Maintains the complete state of the terminal interface.
pub struct UIState {
  /// Builds screens for routes
  pub shell:            RouteShell,
  /// The page being shown
  pub screen:           Screen,
  /// Articles created during this session
  pub articles:         MockArticleStore,
  /// Which panel has focus
  pub focus:            Focus,
  /// Selection in the sidebar
  pub nav:              ListState,
  /// Selected form field or dashboard card
  pub selected:         usize,
  /// Whether keys are typed into the selected field or the search box
  pub editing:          bool,
  /// Active dialog
  pub dialog:           DialogType,
  /// Scroll offset of the article body
  pub scroll_position:  usize,
  /// Largest useful scroll offset, known after the first draw
  pub max_scroll:       Option<usize>,
  /// Message from the last action
  pub notice:           Option<Notice>,
  /// Whether the UI needs to be redrawn
  pub needs_redraw:     bool,
  /// Whether the event loop should run a submit
  pub submit_requested: bool,
}

impl UIState {
  /// Creates the state on the login page.
  ///
  /// # Errors
  ///
  /// Returns an error if the login screen cannot be built.
  pub fn new(shell: RouteShell) -> Result<Self> {
    let screen = shell.open_route(Route::Login)?;
    Ok(Self {
      shell,
      screen,
      articles: MockArticleStore::new(),
      focus: Focus::Content,
      nav: ListState::default(),
      selected: 0,
      editing: false,
      dialog: DialogType::None,
      scroll_position: 0,
      max_scroll: None,
      notice: None,
      needs_redraw: true,
      submit_requested: false,
    })
  }

  /// Replaces the page with the one at `route` and drops the last notice. Failures become an
  /// error notice instead.
  pub fn navigate(&mut self, route: Route) {
    match self.shell.open_route(route) {
      Ok(screen) => {
        debug!(route = %screen.route, "navigated");
        let active = screen
          .layout
          .sidebar
          .as_ref()
          .and_then(|sidebar| sidebar.iter().position(|item| item.active));
        self.nav.select(active.or(Some(0)));
        self.screen = screen;
        self.focus = Focus::Content;
        self.selected = 0;
        self.editing = false;
        self.scroll_position = 0;
        self.max_scroll = None;
        self.notice = None;
      },
      Err(e) => self.notice = Some(Notice::error("Could not open page").with_description(e.to_string())),
    }
    self.needs_redraw = true;
  }

  /// Follows a redirect, keeping its notice.
  pub fn follow(&mut self, redirect: Redirect) {
    self.navigate(redirect.to);
    if redirect.notice.is_some() {
      self.notice = redirect.notice;
    }
  }

  /// The form on the current page, if there is one.
  pub fn form(&self) -> Option<&dyn FormView> {
    match &self.screen.page {
      Page::Login(form) => Some(form as &dyn FormView),
      Page::CreateArticle(form) => Some(form as &dyn FormView),
      _ => None,
    }
  }

  /// The field the cursor is on, if the page has a form.
  pub fn selected_field(&self) -> Option<FieldSpec> {
    self.form().and_then(|form| form.schema().fields.get(self.selected).cloned())
  }

  /// The dashboard card the cursor is on.
  pub fn selected_card(&self) -> Option<&DashboardCard> {
    match &self.screen.page {
      Page::Dashboard(dashboard) => dashboard.cards.get(self.selected),
      _ => None,
    }
  }

  /// Clears the submit request, returning whether there was one.
  pub fn take_submit_request(&mut self) -> bool { std::mem::take(&mut self.submit_requested) }

  /// Submits the form on the current page and applies the outcome.
  pub async fn submit(&mut self) {
    let outcome = match &self.screen.page {
      Page::Login(form) => form.submit(&MockLogin).await,
      Page::CreateArticle(form) => form.submit(&self.articles).await,
      _ => return,
    };
    match outcome {
      SubmitOutcome::Accepted(redirect) => self.follow(redirect),
      SubmitOutcome::Rejected(errors) => {
        self.notice =
          Some(Notice::error(format!("{} field(s) need attention", errors.len())));
        if let Some(first) = self
          .form()
          .and_then(|form| form.schema().fields.iter().position(|f| errors.contains_key(&f.name)))
        {
          self.selected = first;
        }
      },
      SubmitOutcome::CollaboratorFailed(e) => {
        self.notice = Some(
          Notice::error("Submit failed, your input was kept.").with_description(e.to_string()),
        )
      },
      SubmitOutcome::Ignored => {},
    }
    self.needs_redraw = true;
  }

  /// Handles one key press. Returns true only when the user confirmed exit.
  pub fn handle_input(&mut self, key: KeyCode) -> bool {
    let quit = match self.dialog {
      DialogType::ExitConfirm => self.handle_exit_dialog(key),
      DialogType::None if self.editing => {
        self.handle_editing_input(key);
        false
      },
      DialogType::None => self.handle_normal_input(key),
    };
    self.needs_redraw = true;
    quit
  }

  /// Handles input while the exit confirmation dialog is active.
  fn handle_exit_dialog(&mut self, key: KeyCode) -> bool {
    match key {
      KeyCode::Char('y') => true,
      KeyCode::Char('n') | KeyCode::Esc => {
        self.dialog = DialogType::None;
        false
      },
      _ => false,
    }
  }

  /// Handles typing into the selected field or the library search.
  fn handle_editing_input(&mut self, key: KeyCode) {
    match key {
      KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => self.editing = false,
      KeyCode::Char(c) => self.edit_text(|text| text.push(c)),
      KeyCode::Backspace => self.edit_text(|text| {
        text.pop();
      }),
      _ => {},
    }
  }

  /// Applies `edit` to the text being edited and feeds the result back.
  fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
    if let Page::Libraries(engine) = &mut self.screen.page {
      let mut term = engine.search_term().to_string();
      edit(&mut term);
      engine.set_search_term(term);
      return;
    }
    if let (Some(form), Some(field)) = (self.form(), self.selected_field()) {
      let mut value = form.value(&field.name).unwrap_or_default();
      edit(&mut value);
      if let Err(e) = form.set_field(&field.name, value) {
        self.notice = Some(Notice::error(e.to_string()));
      }
    }
  }

  /// Handles input during normal operation.
  fn handle_normal_input(&mut self, key: KeyCode) -> bool {
    match key {
      KeyCode::Char('q') => self.dialog = DialogType::ExitConfirm,
      KeyCode::Tab =>
        if self.screen.layout.sidebar.is_some() {
          self.focus = match self.focus {
            Focus::Sidebar => Focus::Content,
            Focus::Content => Focus::Sidebar,
          };
        },
      _ => match self.focus {
        Focus::Sidebar => self.handle_sidebar_input(key),
        Focus::Content => self.handle_content_input(key),
      },
    }
    false
  }

  /// Moves through the sidebar and opens the chosen page.
  fn handle_sidebar_input(&mut self, key: KeyCode) {
    let Some(sidebar) = &self.screen.layout.sidebar else { return };
    let len = sidebar.len();
    let i = self.nav.selected().unwrap_or(0);
    match key {
      KeyCode::Up | KeyCode::Char('k') => self.nav.select(Some(i.saturating_sub(1))),
      KeyCode::Down | KeyCode::Char('j') => self.nav.select(Some((i + 1).min(len.saturating_sub(1)))),
      KeyCode::Enter =>
        if let Some(item) = sidebar.get(i) {
          let route = item.route.clone();
          self.navigate(route);
        },
      _ => {},
    }
  }

  /// Dispatches page-specific keys.
  fn handle_content_input(&mut self, key: KeyCode) {
    match &mut self.screen.page {
      Page::Login(_) | Page::CreateArticle(_) => self.handle_form_input(key),
      Page::Dashboard(dashboard) => {
        let len = dashboard.cards.len();
        match key {
          KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
          KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(len.saturating_sub(1)),
          KeyCode::Enter =>
            if let Some(route) = self.selected_card().map(|card| card.route.clone()) {
              self.navigate(route);
            },
          _ => {},
        }
      },
      Page::KnowledgeBase(_) => match key {
        KeyCode::Up | KeyCode::Char('k') =>
          self.scroll_position = self.scroll_position.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') =>
          if self.max_scroll.map_or(true, |max| self.scroll_position < max) {
            self.scroll_position += 1;
          },
        _ => {},
      },
      Page::Libraries(engine) => match key {
        KeyCode::Char('/') => self.editing = true,
        KeyCode::Left | KeyCode::Char('h') => {
          engine.previous_page();
        },
        KeyCode::Right | KeyCode::Char('l') => {
          engine.next_page();
        },
        KeyCode::Esc => engine.clear_search(),
        _ => {},
      },
      Page::NotFound { .. } =>
        if key == KeyCode::Enter {
          self.navigate(Route::Dashboard);
        },
    }
  }

  /// Moves between form fields, starts editing, cycles selects and submits.
  fn handle_form_input(&mut self, key: KeyCode) {
    let Some(field_count) = self.form().map(|form| form.schema().fields.len()) else { return };
    match key {
      KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
      KeyCode::Down | KeyCode::Char('j') =>
        self.selected = (self.selected + 1).min(field_count.saturating_sub(1)),
      KeyCode::Enter | KeyCode::Left | KeyCode::Right => match self.selected_field() {
        Some(FieldSpec { kind: FieldKind::Select { options }, name, .. }) => {
          let current = self.form().and_then(|form| form.value(&name)).unwrap_or_default();
          let position = options.iter().position(|option| option.value == current);
          let next = match (key, position) {
            (KeyCode::Left, Some(i)) => (i + options.len() - 1) % options.len(),
            (_, Some(i)) => (i + 1) % options.len(),
            (_, None) => 0,
          };
          if let (Some(form), Some(option)) = (self.form(), options.get(next)) {
            if let Err(e) = form.set_field(&name, option.value.clone()) {
              self.notice = Some(Notice::error(e.to_string()));
            }
          }
        },
        Some(_) if key == KeyCode::Enter => self.editing = true,
        _ => {},
      },
      KeyCode::Char('s') => self.submit_requested = true,
      KeyCode::Char('c') if matches!(self.screen.page, Page::CreateArticle(_)) =>
        self.follow(console_core::form::article::cancel()),
      _ => {},
    }
  }

  /// Records how far the article body can scroll.
  pub fn update_max_scroll(&mut self, available_lines: usize, visible_lines: usize) {
    self.max_scroll = Some(available_lines.saturating_sub(visible_lines));
    self.scroll_position = self.scroll_position.min(available_lines.saturating_sub(visible_lines));
  }
}
