//! Error types for the console core.
//!
//! Nothing in the console is fatal. Field problems are reported inline on the form, handler
//! failures become a notice, and out-of-range paging is ignored. The errors below cover the
//! remaining cases: programming mistakes against a form schema, collaborators that report
//! failure, and bad external data (library files, configuration).
//!
//! # Examples
//!
//! ```
//! use console_core::{error::ConsoleError, form::{LoginCredentials, ValidatedForm}};
//!
//! let form = ValidatedForm::<LoginCredentials>::new();
//! match form.set_field("username", "alex") {
//!   Err(ConsoleError::UnknownField(name)) => println!("no field called {name}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(_) => println!("Updated"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`console_core`](crate) crate.
pub type Result<T> = core::result::Result<T, ConsoleError>;

/// Errors that can occur in the console core.
#[derive(Error, Debug)]
pub enum ConsoleError {
  /// A form operation named a field the schema does not define.
  #[error("No field named \"{0}\" in this form")]
  UnknownField(String),

  /// A value could not be turned into the typed value object of a form.
  ///
  /// Validation normally catches this first; it only surfaces when a model is built from
  /// values that never went through the schema.
  #[error("Field '{field}' is invalid: {message}")]
  InvalidField {
    /// Name of the offending field
    field:   String,
    /// Human-readable reason
    message: String,
  },

  /// A submit handler reported failure.
  ///
  /// The form that invoked it keeps its values so the user can retry.
  #[error("Submit failed: {0}")]
  Collaborator(String),

  /// Library data was well-formed JSON but broke an invariant, such as duplicate ids.
  #[error("Invalid library data: {0}")]
  Library(String),

  /// Library data could not be parsed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The configuration parsed but holds an unusable value.
  #[error("{0}")]
  Config(String),
}
