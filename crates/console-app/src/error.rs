//! Error types for the console-app binary.

use thiserror::Error;

use super::*;

/// Result alias for the binary.
pub type Result<T> = core::result::Result<T, ConsoleAppError>;

/// Errors that end a console-app command.
#[derive(Error, Debug)]
pub enum ConsoleAppError {
  /// Errors from the core library
  #[error(transparent)]
  Core(#[from] ConsoleError),

  /// A prompt could not be shown or answered
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Terminal or file I/O failed
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A form failed validation; the field messages have already been shown
  #[error("{0} field(s) need attention")]
  Rejected(usize),

  /// A submit was dropped because another one was still running
  #[error("A submit is already in progress")]
  Busy,
}
