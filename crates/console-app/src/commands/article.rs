//! Module for the "article" command.

use super::*;

/// Function for the [`Commands::Article`] in the CLI.
pub async fn article<I: UserInteraction>(
  interaction: &I,
  config: Config,
  escape: bool,
) -> Result<()> {
  let config = if escape { config.with_markup(MarkupPolicy::Escaped) } else { config };
  let shell = RouteShell::new(config)?;
  let screen = shell.open_route(Route::KnowledgeBase)?;
  match &screen.page {
    Page::KnowledgeBase(article) => interaction.reply(ResponseContent::Article(article)),
    _ => interaction.reply(ResponseContent::Screen(&screen)),
  }
}
