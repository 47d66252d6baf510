//! Module for the "libraries" command: one page of the library browser.

use super::*;

/// Arguments for [`Commands::Libraries`].
#[derive(Args, Clone)]
pub struct LibrariesArgs {
  /// Only show items whose title, description or tags contain this text
  #[arg(long, short)]
  pub search: Option<String>,

  /// Page to show, starting at 1; pages that do not exist are ignored
  #[arg(long, short, default_value_t = 1)]
  pub page: usize,

  /// JSON file to browse instead of the configured library
  #[arg(long)]
  pub library: Option<PathBuf>,
}

/// Function for the [`Commands::Libraries`] in the CLI.
pub async fn libraries<I: UserInteraction>(
  interaction: &I,
  config: Config,
  args: LibrariesArgs,
) -> Result<()> {
  let LibrariesArgs { search, page, library } = args;
  let config = match library {
    Some(path) => config.with_library_path(path),
    None => config,
  };

  let shell = RouteShell::new(config)?;
  let mut screen = shell.open_route(Route::Libraries)?;
  if let Page::Libraries(engine) = &mut screen.page {
    if let Some(term) = search {
      engine.set_search_term(term);
    }
    if !engine.set_page(page) {
      debug!(page, page_count = engine.page_count(), "requested page does not exist");
    }
  }
  interaction.reply(ResponseContent::Screen(&screen))
}
