//! Terminal front end for the console app.
//!
//! Every page of the console can be reached from the command line:
//!
//! - Open any path and print the page inside its layout
//! - Log in and create knowledge-base articles through validated forms
//! - Browse, search and page through a library
//! - Read the knowledge-base article, with its markup trusted or escaped
//!
//! # Usage
//!
//! ```bash
//! # Show the dashboard
//! console-app open /dashboard
//!
//! # Log in, prompting for anything not given
//! console-app login --email you@example.com
//!
//! # Create an article
//! console-app create-article --title "Rotating keys" --category technical-guide \
//!   --content "Rotate every ninety days." --tags "security, ops"
//!
//! # Search the library and jump to page two
//! console-app libraries --search report --page 2
//!
//! # Read the article with its markup shown literally
//! console-app article --escape
//! ```
//!
//! Without a subcommand the interactive TUI starts when the crate is built with the `tui`
//! feature. Logging goes to stderr; raise it with `-v` (up to `-vvvv`) or `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use console_core::{
  article::{MarkupPolicy, RenderedArticle},
  config::Config,
  error::ConsoleError,
  form::{FieldErrors, FormModel, FormState, SubmitHandler, SubmitOutcome, ValidatedForm},
  query::ListQueryEngine,
  route::{Dashboard, Layout, Notice, NoticeLevel, Page, Redirect, Route, RouteShell, Screen},
};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;
#[cfg(feature = "tui")] pub mod tui;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Terminal front end for the console app")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv, -vvvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Configuration file to use instead of the platform default
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Option<Commands>,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// Loads the configuration from `--config` or the default location.
  fn load_config(&self) -> Result<Config> {
    let path = self.config.clone().unwrap_or_else(Config::default_path);
    Ok(Config::load(path)?)
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Entry point for the console-app CLI
///
/// Parses arguments, sets up logging, loads the configuration and runs the requested command.
///
/// # Errors
///
/// Returns a [`ConsoleAppError`] when the configuration or library data is invalid, a prompt
/// fails, a form is rejected or a submit handler fails.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let command = match cli.command.clone() {
    Some(command) => command,
    #[cfg(feature = "tui")]
    None => Commands::Tui,
    #[cfg(not(feature = "tui"))]
    None => {
      println!("Please specify a command. Use --help for usage information.");
      std::process::exit(1);
    },
  };

  let config = cli.load_config()?;
  debug!(?config, "configuration ready");

  let result = match command {
    Commands::Open { path } => open(&cli, config, &path).await,
    Commands::Login(args) => login(&cli, args).await,
    Commands::CreateArticle(args) => create_article(&cli, args).await,
    Commands::Libraries(args) => libraries(&cli, config, args).await,
    Commands::Article { escape } => article(&cli, config, escape).await,
    #[cfg(feature = "tui")]
    Commands::Tui => tui::run(RouteShell::new(config)?).await,
  };

  if let Err(e) = &result {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
  }
  result
}
