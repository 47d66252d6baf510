//! View-state engines for the console app.
//!
//! `console-core` holds every piece of the console app that has state worth reasoning about,
//! independent of how it ends up on screen:
//!
//! - Schema-validated forms with a guarded async submit
//! - Search, filtering and pagination over a library of items
//! - Article rendering with an explicit markup trust boundary
//! - A static route table and the shared page layout
//!
//! Front ends (the `console-app` CLI and TUI) only display what these types produce and feed
//! user events back into them.
//!
//! # Getting Started
//!
//! ```no_run
//! use console_core::{
//!   form::{login::MockLogin, LoginCredentials, SubmitOutcome, ValidatedForm},
//!   prelude::*,
//!   query::ListQueryEngine,
//!   library::SampleLibrary,
//! };
//!
//! # async fn example() -> Result<(), ConsoleError> {
//! // Browse the sample library
//! let mut libraries = ListQueryEngine::from_provider(&SampleLibrary)?;
//! libraries.set_search_term("marketing");
//! for item in libraries.visible_items() {
//!   println!("{}", item.title);
//! }
//!
//! // Fill in and submit the login form
//! let form = ValidatedForm::<LoginCredentials>::new();
//! form.set_field("email", "you@example.com")?;
//! form.set_field("password", "hunter22")?;
//! if let SubmitOutcome::Accepted(redirect) = form.submit(&MockLogin).await {
//!   println!("Go to {}", redirect.to.path());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`form`]: Field rules, form schemas and the submission state machine
//! - [`library`]: Library items, their kinds and data providers
//! - [`query`]: The search/filter/paginate engine and the page window
//! - [`article`]: Markup, table of contents and the article renderer
//! - [`route`]: Routes, layout chrome, the dashboard and the route shell
//! - [`config`]: User configuration loaded from TOML
//! - [`error`]: The crate error type

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  borrow::Cow,
  collections::{BTreeMap, HashSet},
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod article;
pub mod config;
pub mod error;
pub mod form;
pub mod library;
pub mod query;
pub mod route;

use crate::{error::*, route::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use console_core::prelude::*;
///
/// fn example() -> Result<(), ConsoleError> {
///   let config = Config::load(Config::default_path())?;
///   let shell = RouteShell::new(config)?;
///   let screen = shell.open("/libraries")?;
///   println!("{}", screen.layout.header.title);
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    article::ArticleSource,
    config::Config,
    error::ConsoleError,
    form::{FormModel, SubmitHandler},
    library::LibraryProvider,
    route::{Route, RouteShell},
  };
}
