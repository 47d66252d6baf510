//! Drawing for the Terminal User Interface.
//!
//! Every frame draws the shared layout (header, optional sidebar, footer and help bar) around
//! the current page, then the last notice and any dialog on top. Each page kind has its own
//! drawing method; none of them change what the page holds, only the scroll bounds of the
//! article are written back.

use console_core::form::FieldKind;
use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
  Frame,
};

use super::{
  state::{DialogType, Focus, UIState},
  *,
};

/// Width of the sidebar column.
const SIDEBAR_WIDTH: u16 = 28;

/// Text cursor shown in the field being edited.
const CURSOR: &str = "▏";

/// Renders one frame from a [`UIState`].
///
/// The frame and the state are kept as separate borrows so that widgets can be built from the
/// state while the frame is drawn into.
pub struct UIDrawer<'a, 'b> {
  /// The frame being drawn, from ratatui's `Terminal::draw` callback
  frame: &'a mut Frame<'b>,
  /// The state to show
  state: &'a mut UIState,
}

impl<'a, 'b> UIDrawer<'a, 'b> {
  /// Creates a new drawer instance.
  pub fn new(frame: &'a mut Frame<'b>, state: &'a mut UIState) -> Self { Self { frame, state } }

  /// Draws the whole interface.
  pub fn draw(&mut self) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(3), // Header
        Constraint::Min(0),    // Sidebar and page
        Constraint::Length(1), // Footer
        Constraint::Length(1), // Help
      ])
      .split(self.frame.area());

    self.draw_header(chunks[0]);

    let page_area = if self.state.screen.layout.sidebar.is_some() {
      let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);
      self.draw_sidebar(columns[0]);
      columns[1]
    } else {
      chunks[1]
    };

    let page_area = if self.state.notice.is_some() {
      let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(page_area);
      self.draw_notice(rows[1]);
      rows[0]
    } else {
      page_area
    };

    self.draw_page(page_area);
    self.draw_footer(chunks[2]);
    self.draw_help_bar(chunks[3]);

    if self.state.dialog == DialogType::ExitConfirm {
      self.draw_exit_dialog();
    }

    self.state.needs_redraw = false;
  }

  /// Draws the application name and the page title.
  fn draw_header(&mut self, area: Rect) {
    let header = &self.state.screen.layout.header;
    let title = Paragraph::new(Line::from(vec![
      Span::styled(header.title.as_str(), styles::TITLE),
      Span::styled(CRUMB_SEPARATOR, styles::HELP),
      Span::styled(header.page_title.as_str(), Style::default().fg(Color::White)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(styles::border_style(false)));
    self.frame.render_widget(title, area);
  }

  /// Draws the navigation list with the active page marked.
  fn draw_sidebar(&mut self, area: Rect) {
    let Some(sidebar) = &self.state.screen.layout.sidebar else { return };
    let items: Vec<ListItem> = sidebar
      .iter()
      .map(|item| {
        let style = if item.active { styles::SUCCESS } else { styles::NORMAL };
        ListItem::new(Span::styled(format!("{} {}", item.icon, item.label), style))
      })
      .collect();

    let list = List::new(items)
      .block(
        Block::default()
          .title(Span::styled("Navigation", styles::TITLE))
          .borders(Borders::ALL)
          .border_style(styles::border_style(self.state.focus == Focus::Sidebar)),
      )
      .highlight_style(styles::HIGHLIGHT)
      .highlight_symbol("▶ ");

    self.frame.render_stateful_widget(list, area, &mut self.state.nav);
  }

  /// Frames `area` for the page and returns the inside.
  fn page_block(&mut self, title: &str, area: Rect) -> Rect {
    let block = Block::default()
      .title(Span::styled(format!(" {title} "), styles::TITLE))
      .borders(Borders::ALL)
      .border_style(styles::border_style(self.state.focus == Focus::Content))
      .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    self.frame.render_widget(block, area);
    inner
  }

  /// Draws whatever page is open.
  fn draw_page(&mut self, area: Rect) {
    match self.state.screen.page {
      Page::Login(_) | Page::CreateArticle(_) => self.draw_form(area),
      Page::Dashboard(_) => self.draw_dashboard(area),
      Page::KnowledgeBase(_) => self.draw_article(area),
      Page::Libraries(_) => self.draw_library(area),
      Page::NotFound { .. } => self.draw_not_found(area),
    }
  }

  /// Draws a form: every field with its value, then its error or description, then the buttons.
  fn draw_form(&mut self, area: Rect) {
    let Some(form) = self.state.form() else { return };
    let schema = form.schema();
    let snapshot = form.snapshot();
    let focused = self.state.focus == Focus::Content;

    let mut lines = vec![Line::from(Span::styled(schema.description.clone(), styles::HELP))];
    for (i, field) in schema.fields.iter().enumerate() {
      let selected = focused && i == self.state.selected;
      let value = snapshot.values.get(&field.name).unwrap_or_default();
      let mut shown = match &field.kind {
        kind if kind.is_masked() => "•".repeat(value.chars().count()),
        FieldKind::Select { options } => options
          .iter()
          .find(|option| option.value == value)
          .map_or_else(|| value.to_string(), |option| format!("◀ {} ▶", option.label)),
        _ => value.to_string(),
      };
      let mut value_style = Style::default().fg(Color::White);
      if selected && self.state.editing {
        shown.push_str(CURSOR);
      } else if value.is_empty() {
        shown = field.placeholder.clone().unwrap_or_default();
        value_style = styles::HELP;
      }

      lines.push(Line::from(""));
      let label_style = if selected { styles::HIGHLIGHT } else { styles::LABEL };
      lines.push(Line::from(vec![
        Span::styled(if selected { "▶ " } else { "  " }, styles::KEY_HIGHLIGHT),
        Span::styled(field.label.clone(), label_style),
      ]));
      lines.push(Line::from(vec![Span::raw("  "), Span::styled(shown, value_style)]));
      if let Some(error) = snapshot.errors.get(&field.name) {
        lines.push(Line::from(Span::styled(format!("  {error}"), styles::ERROR)));
      } else if let Some(description) = &field.description {
        lines.push(Line::from(Span::styled(format!("  {description}"), styles::HELP)));
      }
    }

    let button = if snapshot.submitting { &schema.busy_label } else { &schema.submit_label };
    let mut buttons = vec![
      Span::styled("s", styles::KEY_HIGHLIGHT),
      Span::styled(format!(" [ {button} ]"), Style::default().fg(Color::White)),
    ];
    if matches!(self.state.screen.page, Page::CreateArticle(_)) {
      buttons.push(Span::raw("   "));
      buttons.push(Span::styled("c", styles::KEY_HIGHLIGHT));
      buttons.push(Span::styled(" [ Cancel ]", styles::NORMAL));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(buttons));

    let title = schema.title.clone();
    let inner = self.page_block(&title, area);
    self.frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
  }

  /// Draws the dashboard cards and the activity panel.
  fn draw_dashboard(&mut self, area: Rect) {
    let Page::Dashboard(dashboard) = &self.state.screen.page else { return };
    let lines = dashboard_lines(dashboard, self.state.selected);
    let inner = self.page_block("Dashboard", area);
    self.frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
  }

  /// Draws the article: table of contents on the left, the scrollable body on the right.
  fn draw_article(&mut self, area: Rect) {
    let Page::KnowledgeBase(article) = &self.state.screen.page else { return };
    let columns = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
      .split(area);

    let toc: Vec<Line> = article
      .toc
      .iter()
      .map(|entry| {
        let branch = if entry.last { TREE_LEAF } else { TREE_BRANCH };
        Line::from(vec![
          Span::styled(format!("{}{branch} ", CONTINUE_PREFIX.repeat(entry.indent)), styles::HELP),
          Span::styled(entry.title.clone(), styles::NORMAL),
        ])
      })
      .collect();
    let toc = Paragraph::new(toc).wrap(Wrap { trim: false }).block(
      Block::default()
        .title(Span::styled(article.toc_heading.clone(), styles::TITLE))
        .borders(Borders::ALL)
        .border_style(styles::border_style(false)),
    );
    self.frame.render_widget(toc, columns[0]);

    let crumbs: Vec<_> = article.breadcrumbs.iter().map(|crumb| crumb.label.as_str()).collect();
    let body_block = Block::default()
      .title(Line::from(vec![
        Span::styled("📖 ", Style::default().fg(Color::LightBlue)),
        Span::styled(article.title.clone(), styles::TITLE),
      ]))
      .title_bottom(Span::styled(crumbs.join(CRUMB_SEPARATOR), styles::HELP))
      .borders(Borders::ALL)
      .border_style(styles::border_style(self.state.focus == Focus::Content))
      .padding(Padding::horizontal(1));
    let body_area = body_block.inner(columns[1]);
    let lines = wrapped_line_count(&article.body, body_area.width);
    let body = Paragraph::new(article.body.clone())
      .style(styles::NORMAL)
      .wrap(Wrap { trim: false })
      .block(body_block)
      .scroll((u16::try_from(self.state.scroll_position).unwrap_or(u16::MAX), 0));
    self.frame.render_widget(body, columns[1]);

    self.state.update_max_scroll(lines, body_area.height as usize);
    self.draw_scroll_indicator(columns[1]);
  }

  /// Shows "current/total" in the corner of the article when it scrolls.
  fn draw_scroll_indicator(&mut self, area: Rect) {
    let Some(max_scroll) = self.state.max_scroll.filter(|max| *max > 0) else { return };
    let indicator = format!(" {}/{} ", self.state.scroll_position + 1, max_scroll + 1);
    let width = indicator.len() as u16;
    let indicator_area = Rect {
      x: area.x + area.width.saturating_sub(width + 1),
      y: area.y + area.height.saturating_sub(1),
      width: width.min(area.width),
      height: 1,
    };
    let text = Paragraph::new(indicator).alignment(Alignment::Right).style(styles::HELP);
    self.frame.render_widget(text, indicator_area);
  }

  /// Draws the search box, the visible items and the pagination control.
  fn draw_library(&mut self, area: Rect) {
    let Page::Libraries(engine) = &self.state.screen.page else { return };
    let editing = self.state.editing;

    let mut search = vec![
      Span::styled("/", styles::KEY_HIGHLIGHT),
      Span::styled(" Search: ", styles::LABEL),
      Span::styled(engine.search_term().to_string(), Style::default().fg(Color::White)),
    ];
    if editing {
      search.push(Span::styled(CURSOR, styles::KEY_HIGHLIGHT));
    } else if engine.search_term().is_empty() {
      search.push(Span::styled("title, description or tag", styles::HELP));
    }

    let mut lines = vec![
      Line::from(search),
      Line::from(Span::styled(
        format!(
          "Showing {} of {} items (page {} of {})",
          engine.visible_items().len(),
          engine.filtered_count(),
          engine.page(),
          engine.page_count()
        ),
        styles::HELP,
      )),
    ];

    if let Some(empty) = engine.empty_state() {
      lines.push(Line::from(""));
      lines.push(Line::from(Span::styled(empty.message, Style::default().fg(Color::White))));
      if let Some(hint) = empty.hint {
        lines.push(Line::from(Span::styled(hint, styles::HELP)));
      }
    }

    for item in engine.visible_items() {
      let look = item.kind.presentation();
      lines.push(Line::from(""));
      lines.push(Line::from(vec![
        Span::raw(format!("{} ", look.icon)),
        Span::styled(item.title.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" [{}]", look.label), styles::HELP),
      ]));
      lines.push(Line::from(Span::styled(format!("   {}", item.description), styles::NORMAL)));
      let mut details = item.metadata.clone();
      if let Some(date) = item.date_added {
        details.push(match &item.author {
          Some(author) => format!("Added {date} by {author}"),
          None => format!("Added {date}"),
        });
      }
      if !details.is_empty() {
        lines.push(Line::from(Span::styled(format!("   {}", details.join(" · ")), styles::HELP)));
      }
      if !item.tags.is_empty() {
        let tags: Vec<_> = item.tags.iter().map(|tag| format!("#{tag}")).collect();
        lines.push(Line::from(Span::styled(format!("   {}", tags.join(" ")), styles::LABEL)));
      }
    }

    let pagination = engine.shows_pagination().then(|| pagination_line(engine));

    let inner = self.page_block("Libraries", area);
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(0), Constraint::Length(1)])
      .split(inner);
    self.frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[0]);
    if let Some(pagination) = pagination {
      self.frame.render_widget(
        Paragraph::new(pagination).alignment(Alignment::Center).style(styles::KEY_HIGHLIGHT),
        rows[1],
      );
    }
  }

  /// Draws the fallback page for an unknown path.
  fn draw_not_found(&mut self, area: Rect) {
    let Page::NotFound { path } = &self.state.screen.page else { return };
    let lines = vec![
      Line::from(""),
      Line::from(Span::styled("404", styles::ERROR.add_modifier(Modifier::BOLD))),
      Line::from(vec![
        Span::styled("Nothing lives at ", styles::NORMAL),
        Span::styled(path.clone(), Style::default().fg(Color::Yellow)),
      ]),
      Line::from(""),
      Line::from(vec![
        Span::styled("Press ", styles::HELP),
        Span::styled("Enter", styles::KEY_HIGHLIGHT),
        Span::styled(" to return to the dashboard", styles::HELP),
      ]),
    ];
    let inner = self.page_block(Route::NotFound(String::new()).title(), area);
    self.frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
  }

  /// Draws the last notice in a box coloured by its level.
  fn draw_notice(&mut self, area: Rect) {
    let Some(notice) = &self.state.notice else { return };
    let (prefix, color) = match notice.level {
      NoticeLevel::Success => (SUCCESS_PREFIX, Color::Green),
      NoticeLevel::Info => (INFO_PREFIX, Color::Blue),
      NoticeLevel::Error => (ERROR_PREFIX, Color::Red),
    };
    let mut lines = vec![Line::from(vec![
      Span::styled(prefix, Style::default().fg(color)),
      Span::styled(notice.title.clone(), Style::default().fg(Color::White)),
    ])];
    if let Some(description) = &notice.description {
      lines.push(Line::from(Span::styled(description.clone(), styles::HELP)));
    }
    let notice = Paragraph::new(lines)
      .wrap(Wrap { trim: true })
      .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
    self.frame.render_widget(notice, area);
  }

  /// Draws the copyright line.
  fn draw_footer(&mut self, area: Rect) {
    let footer = Paragraph::new(self.state.screen.layout.footer.as_str())
      .alignment(Alignment::Center)
      .style(styles::HELP);
    self.frame.render_widget(footer, area);
  }

  /// Draws the keys that do something on the current page.
  fn draw_help_bar(&mut self, area: Rect) {
    let keys: &[(&str, &str)] = if self.state.editing {
      &[("type", "edit"), ("⌫", "delete"), ("Enter/Esc", "done")]
    } else if self.state.focus == Focus::Sidebar {
      &[("↑↓", "nav"), ("Enter", "open"), ("Tab", "page"), ("q", "quit")]
    } else {
      match self.state.screen.page {
        Page::Login(_) => &[("↑↓", "field"), ("Enter", "edit"), ("s", "submit"), ("q", "quit")],
        Page::CreateArticle(_) => &[
          ("↑↓", "field"),
          ("Enter", "edit"),
          ("←→", "category"),
          ("s", "save"),
          ("c", "cancel"),
          ("Tab", "menu"),
          ("q", "quit"),
        ],
        Page::Dashboard(_) =>
          &[("↑↓", "card"), ("Enter", "open"), ("Tab", "menu"), ("q", "quit")],
        Page::KnowledgeBase(_) => &[("↑↓", "scroll"), ("Tab", "menu"), ("q", "quit")],
        Page::Libraries(_) => &[
          ("/", "search"),
          ("Esc", "clear"),
          ("←→", "page"),
          ("Tab", "menu"),
          ("q", "quit"),
        ],
        Page::NotFound { .. } => &[("Enter", "dashboard"), ("q", "quit")],
      }
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in keys.iter().enumerate() {
      if i > 0 {
        spans.push(Span::styled(" • ", Style::default().fg(Color::Blue)));
      }
      spans.push(Span::styled(*key, styles::KEY_HIGHLIGHT));
      spans.push(Span::styled(format!(":{action}"), styles::HELP));
    }
    self.frame.render_widget(Paragraph::new(Line::from(spans)), area);
  }

  /// Draws the exit confirmation dialog.
  fn draw_exit_dialog(&mut self) {
    let content = vec![
      Line::from(Span::styled("Are you sure you want to quit?", Style::default().fg(Color::White))),
      Line::from(""),
      Line::from(vec![
        Span::styled("Press ", styles::HELP),
        Span::styled("y", styles::KEY_HIGHLIGHT),
        Span::styled(" to confirm, ", styles::HELP),
        Span::styled("n", styles::KEY_HIGHLIGHT),
        Span::styled(" to cancel", styles::HELP),
      ]),
    ];

    self.draw_dialog("Exit Confirmation", &content, Color::Red);
  }

  /// Draws a centered dialog box with the given content.
  fn draw_dialog(&mut self, title: &str, content: &[Line], color: Color) {
    let dialog_box = create_dialog_box(title, content, self.frame.area());

    self.frame.render_widget(Clear, dialog_box);
    self.frame.render_widget(
      Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD))),
      dialog_box,
    );
    self.frame.render_widget(
      Paragraph::new(content.to_vec()).alignment(Alignment::Center),
      dialog_box.inner(Margin { vertical: 1, horizontal: 2 }),
    );
  }
}

/// Lines of the dashboard, with the card at `selected` highlighted.
fn dashboard_lines(dashboard: &Dashboard, selected: usize) -> Vec<Line<'static>> {
  let mut lines = vec![
    Line::from(Span::styled(dashboard.heading, styles::TITLE)),
    Line::from(Span::styled(dashboard.intro, styles::NORMAL)),
  ];
  for (i, card) in dashboard.cards.iter().enumerate() {
    let title_style = match (i == selected, card.highlight) {
      (true, _) => styles::HIGHLIGHT,
      (false, true) => Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
      (false, false) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
      Span::styled(if i == selected { "▶ " } else { "  " }, styles::KEY_HIGHLIGHT),
      Span::styled(card.title, title_style),
    ]));
    lines.push(Line::from(Span::styled(format!("  {}", card.description), styles::NORMAL)));
    lines.push(Line::from(Span::styled(format!("  {}", card.body), styles::HELP)));
    lines.push(Line::from(Span::styled(format!("  {ARROW} {}", card.action), styles::LABEL)));
  }
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(dashboard.activity_title, styles::TITLE)));
  lines.push(Line::from(Span::styled(dashboard.activity_text(), styles::HELP)));
  lines
}

/// Centers a box sized to its content inside `r`, clamped to the screen.
fn create_dialog_box(title: &str, content: &[Line], r: Rect) -> Rect {
  let content_width = content.iter().map(Line::width).max().unwrap_or(0);
  let width = (title.len().max(content_width).max(40) as u16 + 4).min(r.width);
  let height = (content.len() as u16 + 2).min(r.height);

  let popup_layout = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(r.height.saturating_sub(height) / 2),
      Constraint::Length(height),
      Constraint::Min(0),
    ])
    .split(r);

  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Length(r.width.saturating_sub(width) / 2),
      Constraint::Length(width),
      Constraint::Min(0),
    ])
    .split(popup_layout[1])[1]
}

/// How many rows `text` takes when word-wrapped to `width` columns. Blank lines count.
fn wrapped_line_count(text: &str, width: u16) -> usize {
  let width = usize::from(width.max(1));
  text
    .lines()
    .map(|line| {
      let mut rows = 1;
      let mut current = 0;
      for word in line.split_whitespace() {
        let len = word.chars().count();
        if current == 0 {
          current = len;
        } else if current + 1 + len <= width {
          current += 1 + len;
        } else {
          rows += 1;
          current = len;
        }
        rows += current.saturating_sub(1) / width;
        current = current.min(width);
      }
      rows
    })
    .sum()
}
