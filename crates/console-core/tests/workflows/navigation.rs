use super::*;

fn shell() -> RouteShell { RouteShell::new(Config::default().with_footer_year(2024)).unwrap() }

#[test]
fn every_page_resolves_and_renders() -> TestResult<()> {
  let shell = shell();
  for route in Route::pages() {
    let screen = shell.open(route.path())?;
    assert_eq!(&screen.route, route);
    assert_eq!(screen.layout.header.title, "Console App");
    assert_eq!(screen.layout.header.page_title, route.title());
    assert_eq!(screen.layout.footer, "© 2024 Experience Studio Console. All rights reserved.");
  }
  Ok(())
}

#[test]
fn sidebar_marks_the_current_page() -> TestResult<()> {
  let shell = shell();
  for path in ["/dashboard", "/knowledge-base", "/libraries", "/create-knowledge-base"] {
    let screen = shell.open(path)?;
    let sidebar = screen.layout.sidebar.ok_or("app pages have a sidebar")?;
    let active: Vec<_> = sidebar.iter().filter(|item| item.active).collect();
    assert_eq!(active.len(), 1, "{path}");
    assert_eq!(active[0].route.path(), path);
  }
  assert!(shell.open("/")?.layout.sidebar.is_none());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn login_then_create_an_article() -> TestResult<()> {
  let shell = shell();

  let Page::Login(form) = shell.open("/")?.page else { panic!("expected the login form") };
  form.set_field("email", "editor@example.com")?;
  form.set_field("password", "correct horse")?;
  let redirect = form.submit(&MockLogin).await.accepted().ok_or("login failed")?;

  let dashboard = shell.open_route(redirect.to)?;
  let Page::Dashboard(contents) = dashboard.page else { panic!("expected the dashboard") };
  let quick = contents.cards.iter().find(|card| card.highlight).ok_or("no quick action")?;

  let Page::CreateArticle(form) = shell.open_route(quick.route.clone())?.page else {
    panic!("expected the create form")
  };
  assert_eq!(form.submit_label(), "Save Article");
  form.set_field("title", "Rotating keys")?;
  form.set_field("category", ArticleCategory::TechnicalGuide.value())?;
  form.set_field("content", "Rotate every ninety days & <never> reuse.")?;

  let store = MockArticleStore::new();
  let redirect = form.submit(&store).await.accepted().ok_or("article was rejected")?;
  let screen = shell.open(redirect.to.path())?;
  assert_eq!(screen.route, Route::KnowledgeBase);
  assert_eq!(store.articles()[0].title, "Rotating keys");
  Ok(())
}

#[test]
fn unknown_paths_render_the_fallback() -> TestResult<()> {
  let screen = shell().open("/reports/2024")?;
  assert_eq!(screen.route, Route::NotFound("/reports/2024".into()));
  assert!(matches!(screen.page, Page::NotFound { ref path } if path == "/reports/2024"));
  assert!(screen.layout.sidebar.is_none());
  Ok(())
}

#[test]
fn article_markup_choice_is_explicit() -> TestResult<()> {
  let toc = [TocNode::new("a", "A", 1).with_child(TocNode::new("b", "B", 2))];
  let trusted = ArticleRenderer::render("Notes", &Markup::trusted("<em>x</em>"), &toc);
  let escaped = ArticleRenderer::render("Notes", &Markup::escaped("<em>x</em>"), &toc);
  assert_eq!(trusted.body, "<em>x</em>");
  assert_eq!(escaped.body, "&lt;em&gt;x&lt;/em&gt;");
  assert_eq!(escaped.toc[1].anchor, "#b");

  let content = SampleArticle.article()?;
  let rendered = ArticleRenderer::render_content(&content, MarkupPolicy::Trusted);
  assert_eq!(rendered.title, "Understanding the Console App Interface");
  assert_eq!(rendered.toc.len(), 5);
  Ok(())
}

#[test]
fn config_file_drives_the_shell() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("config.toml");
  std::fs::write(&path, "page_size = 5\nmarkup = \"escaped\"\nfooter_year = 2030\n")?;

  let shell = RouteShell::new(Config::load(&path)?)?;
  let screen = shell.open("/knowledge-base")?;
  assert!(screen.layout.footer.contains("2030"));
  let Page::KnowledgeBase(article) = screen.page else { panic!("expected the article") };
  assert!(!article.body.contains('<'));

  let Page::Libraries(engine) = shell.open("/libraries")?.page else {
    panic!("expected the library browser")
  };
  assert_eq!(engine.page_size(), 5);
  assert_eq!(engine.page_count(), 2);
  Ok(())
}

#[test]
fn invalid_config_is_refused() {
  assert!(matches!(
    RouteShell::new(Config::default().with_page_size(0)),
    Err(ConsoleError::Config(_))
  ));
}
