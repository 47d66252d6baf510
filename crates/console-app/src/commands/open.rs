//! Module for the "open" command: print any page by its path.

use super::*;

/// Function for the [`Commands::Open`] in the CLI.
pub async fn open<I: UserInteraction>(interaction: &I, config: Config, path: &str) -> Result<()> {
  let shell = RouteShell::new(config)?;
  let screen = shell.open(path)?;
  info!(route = %screen.route, "rendering page");
  interaction.reply(ResponseContent::Screen(&screen))
}
