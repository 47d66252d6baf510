//! Turns a path into a fully built page inside the shared layout.

use super::*;
use crate::{
  article::{ArticleRenderer, ArticleSource, RenderedArticle, SampleArticle},
  config::Config,
  form::{LoginCredentials, NewArticle, ValidatedForm},
  library::{JsonLibrary, LibraryProvider, SampleLibrary},
  query::ListQueryEngine,
};

/// The controller of one page, freshly initialised.
#[derive(Debug)]
pub enum Page {
  /// Empty login form
  Login(ValidatedForm<LoginCredentials>),
  /// Empty create-article form
  CreateArticle(ValidatedForm<NewArticle>),
  /// Dashboard cards and activity
  Dashboard(Dashboard),
  /// The rendered knowledge-base article
  KnowledgeBase(RenderedArticle),
  /// Library browser on page one with no search term
  Libraries(ListQueryEngine),
  /// Fallback for an unknown path
  NotFound {
    /// The path that was asked for
    path: String,
  },
}

/// A page together with its chrome.
#[derive(Debug)]
pub struct Screen {
  /// Resolved route
  pub route:  Route,
  /// Header, sidebar and footer
  pub layout: Layout,
  /// Page controller
  pub page:   Page,
}

/// Maps paths to pages, wiring in the configured content providers.
pub struct RouteShell {
  /// User configuration
  config:   Config,
  /// Source of library items
  library:  Box<dyn LibraryProvider + Send + Sync>,
  /// Source of the knowledge-base article
  articles: Box<dyn ArticleSource + Send + Sync>,
}

impl std::fmt::Debug for RouteShell {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RouteShell").field("config", &self.config).finish_non_exhaustive()
  }
}

impl RouteShell {
  /// Creates a shell for `config`.
  ///
  /// The library comes from `config.library_path` when set, otherwise from the bundled sample.
  ///
  /// # Errors
  ///
  /// Returns [`ConsoleError::Config`] if the configuration is invalid.
  pub fn new(config: Config) -> Result<Self> {
    config.validate()?;
    let library: Box<dyn LibraryProvider + Send + Sync> = match &config.library_path {
      Some(path) => Box::new(JsonLibrary::new(path)),
      None => Box::new(SampleLibrary),
    };
    Ok(Self { config, library, articles: Box::new(SampleArticle) })
  }

  /// Replaces the library provider.
  pub fn with_library(mut self, library: impl LibraryProvider + Send + Sync + 'static) -> Self {
    self.library = Box::new(library);
    self
  }

  /// Replaces the article source.
  pub fn with_articles(mut self, articles: impl ArticleSource + Send + Sync + 'static) -> Self {
    self.articles = Box::new(articles);
    self
  }

  /// The configuration this shell was built with.
  pub fn config(&self) -> &Config { &self.config }

  /// Resolves `path` and builds its screen.
  ///
  /// # Errors
  ///
  /// Propagates failures of the library provider or the article source.
  pub fn open(&self, path: &str) -> Result<Screen> { self.open_route(Route::resolve(path)) }

  /// Builds the screen for `route`.
  ///
  /// # Errors
  ///
  /// Propagates failures of the library provider or the article source.
  pub fn open_route(&self, route: Route) -> Result<Screen> {
    let page = match &route {
      Route::Login => Page::Login(ValidatedForm::new()),
      Route::CreateKnowledgeBase => Page::CreateArticle(ValidatedForm::new()),
      Route::Dashboard => Page::Dashboard(Dashboard::default()),
      Route::KnowledgeBase => Page::KnowledgeBase(ArticleRenderer::render_content(
        &self.articles.article()?,
        self.config.markup,
      )),
      Route::Libraries => Page::Libraries(
        ListQueryEngine::from_provider(self.library.as_ref())?
          .with_page_size(self.config.page_size),
      ),
      Route::NotFound(path) => {
        warn!(%path, "no page at this path");
        Page::NotFound { path: path.clone() }
      },
    };
    debug!(route = %route, "opened page");
    Ok(Screen { layout: Layout::for_route(&route, self.config.footer_year()), route, page })
  }
}
