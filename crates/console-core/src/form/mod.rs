//! Schema-validated forms and their submission state machine.
//!
//! A [`ValidatedForm`] owns the state of one form instance: the current value of every field,
//! the current error of every invalid field, and whether a submit is in flight. It is generic
//! over a [`FormModel`], the typed value object a successful submit produces, and hands that
//! object to a caller-supplied [`SubmitHandler`].
//!
//! The lifecycle is:
//!
//! 1. Created with every field empty and no errors.
//! 2. [`ValidatedForm::set_field`] on every edit: the value is stored and only that field is
//!    re-validated.
//! 3. [`ValidatedForm::submit`]: every field is validated. Any failure replaces the error map
//!    and rejects the submit. Otherwise the form is marked as submitting, the handler is
//!    awaited, and the flag is cleared again whatever the handler returned.
//!
//! A submit that arrives while another one is in flight is ignored, so a double press never
//! reaches the handler twice.
//!
//! # Examples
//!
//! ```
//! use console_core::form::{LoginCredentials, SubmitOutcome, ValidatedForm, login::MockLogin};
//!
//! # async fn example() -> Result<(), console_core::error::ConsoleError> {
//! let form = ValidatedForm::<LoginCredentials>::new();
//! form.set_field("email", "bad")?;
//! assert!(form.error("email").is_some());
//!
//! match form.submit(&MockLogin).await {
//!   SubmitOutcome::Rejected(errors) => assert_eq!(errors.len(), 2),
//!   _ => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

use std::{
  marker::PhantomData,
  sync::{Mutex, MutexGuard, PoisonError},
};

use super::*;

pub mod article;
pub mod login;
pub mod schema;

pub use self::{
  article::{ArticleCategory, NewArticle},
  login::LoginCredentials,
  schema::*,
};

/// A typed value object produced by a successful form submit.
pub trait FormModel: Sized + Send + Sync {
  /// The schema every instance of this form is validated against.
  fn schema() -> FormSchema;

  /// Builds the value object from values that passed [`FormModel::schema`].
  ///
  /// # Errors
  ///
  /// Returns [`ConsoleError::InvalidField`] when the values do not describe a valid instance.
  /// A submit reports it as a field error. Any other error ends the submit as
  /// [`SubmitOutcome::CollaboratorFailed`].
  fn from_values(values: &FormValues) -> Result<Self>;
}

/// The external collaborator a form hands its validated value object to.
///
/// Implementations decide what a submit *means* (navigate, store, notify); the form only
/// tracks whether one is running.
#[async_trait]
pub trait SubmitHandler<M: FormModel>: Send + Sync {
  /// What a successful submit produces, usually a [`Redirect`].
  type Output: Send;

  /// Processes a validated value object.
  ///
  /// # Errors
  ///
  /// Any error is reported back to the caller as [`SubmitOutcome::CollaboratorFailed`].
  async fn submit(&self, model: &M) -> Result<Self::Output>;
}

/// Result of [`ValidatedForm::submit`].
#[derive(Debug)]
pub enum SubmitOutcome<T> {
  /// Local validation failed; the handler was not called.
  Rejected(FieldErrors),
  /// The handler succeeded with this output.
  Accepted(T),
  /// Validation passed but the handler reported failure; values are kept for a retry.
  CollaboratorFailed(ConsoleError),
  /// Another submit was already in flight; nothing happened.
  Ignored,
}

impl<T> SubmitOutcome<T> {
  /// Whether the submit passed validation, whatever the handler did.
  pub fn passed_validation(&self) -> bool {
    matches!(self, SubmitOutcome::Accepted(_) | SubmitOutcome::CollaboratorFailed(_))
  }

  /// The handler's output, if it succeeded.
  pub fn accepted(self) -> Option<T> {
    match self {
      SubmitOutcome::Accepted(output) => Some(output),
      _ => None,
    }
  }
}

/// Mutable state of one form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
  /// Current value of every field
  pub values:     FormValues,
  /// Current error of every invalid field
  pub errors:     FieldErrors,
  /// Whether a submit is waiting on its handler
  pub submitting: bool,
}

/// A form instance validated against the schema of `M`.
///
/// State lives behind a mutex that is only held for synchronous updates, never across the
/// handler call, so `submit` can take `&self` and concurrent submits see each other.
#[derive(Debug)]
pub struct ValidatedForm<M: FormModel> {
  /// Schema of `M`, built once per instance
  schema: FormSchema,
  /// Values, errors and the in-flight flag
  state:  Mutex<FormState>,
  /// Marker for the value object type
  model:  PhantomData<fn() -> M>,
}

impl<M: FormModel> Default for ValidatedForm<M> {
  fn default() -> Self { Self::new() }
}

impl<M: FormModel> ValidatedForm<M> {
  /// Creates a form with every field empty and no errors.
  pub fn new() -> Self {
    let schema = M::schema();
    let state = FormState {
      values:     FormValues::empty(&schema),
      errors:     FieldErrors::new(),
      submitting: false,
    };
    Self { schema, state: Mutex::new(state), model: PhantomData }
  }

  /// Locks the state. A poisoned lock still holds consistent data since every update is a
  /// single assignment.
  fn state(&self) -> MutexGuard<'_, FormState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// The schema this form validates against.
  pub fn schema(&self) -> &FormSchema { &self.schema }

  /// Stores a new value for `name` and re-validates that field only.
  ///
  /// # Errors
  ///
  /// Returns [`ConsoleError::UnknownField`] if the schema has no such field; the state is left
  /// untouched in that case.
  pub fn set_field(&self, name: &str, value: impl Into<String>) -> Result<()> {
    let value = value.into();
    let error = self.schema.check_field(name, &value)?;
    trace!(field = name, valid = error.is_none(), "field updated");

    let mut state = self.state();
    state.values.set(name, value);
    match error {
      Some(message) => state.errors.insert(name.to_string(), message),
      None => state.errors.remove(name),
    };
    Ok(())
  }

  /// Current value of a field.
  pub fn value(&self, name: &str) -> Option<String> {
    self.state().values.get(name).map(str::to_owned)
  }

  /// Current error of a field, if it is invalid.
  pub fn error(&self, name: &str) -> Option<String> { self.state().errors.get(name).cloned() }

  /// Every current field error.
  pub fn errors(&self) -> FieldErrors { self.state().errors.clone() }

  /// Snapshot of every current value.
  pub fn values(&self) -> FormValues { self.state().values.clone() }

  /// Snapshot of the whole state.
  pub fn snapshot(&self) -> FormState { self.state().clone() }

  /// Whether a submit is waiting on its handler.
  pub fn is_submitting(&self) -> bool { self.state().submitting }

  /// Whether every field currently passes its rules.
  pub fn is_valid(&self) -> bool {
    let state = self.state();
    self.schema.validate(&state.values).is_empty()
  }

  /// Label for the submit button in the current state.
  pub fn submit_label(&self) -> String {
    if self.is_submitting() {
      self.schema.busy_label.clone()
    } else {
      self.schema.submit_label.clone()
    }
  }

  /// Validates every field and, if all pass, hands the value object to `handler`.
  ///
  /// See the [module documentation](self) for the full state machine. Field values are never
  /// cleared by a submit.
  pub async fn submit<H>(&self, handler: &H) -> SubmitOutcome<H::Output>
  where H: SubmitHandler<M> + ?Sized {
    let model = {
      let mut state = self.state();
      if state.submitting {
        debug!(form = %self.schema.title, "submit ignored, another one is in flight");
        return SubmitOutcome::Ignored;
      }

      let errors = self.schema.validate(&state.values);
      if !errors.is_empty() {
        debug!(form = %self.schema.title, errors = errors.len(), "submit rejected");
        state.errors = errors.clone();
        return SubmitOutcome::Rejected(errors);
      }
      state.errors.clear();

      match M::from_values(&state.values) {
        Ok(model) => {
          state.submitting = true;
          model
        },
        Err(ConsoleError::InvalidField { field, message }) => {
          debug!(form = %self.schema.title, %field, "submit rejected by model");
          state.errors.insert(field, message);
          return SubmitOutcome::Rejected(state.errors.clone());
        },
        Err(e) => {
          warn!(form = %self.schema.title, error = %e, "building the value object failed");
          return SubmitOutcome::CollaboratorFailed(e);
        },
      }
    };

    let _reset = SubmittingGuard(self);
    match handler.submit(&model).await {
      Ok(output) => {
        info!(form = %self.schema.title, "submit accepted");
        SubmitOutcome::Accepted(output)
      },
      Err(e) => {
        warn!(form = %self.schema.title, error = %e, "submit handler failed");
        SubmitOutcome::CollaboratorFailed(e)
      },
    }
  }
}

/// Clears the submitting flag when the handler call settles or its future is dropped.
struct SubmittingGuard<'a, M: FormModel>(&'a ValidatedForm<M>);

impl<M: FormModel> Drop for SubmittingGuard<'_, M> {
  fn drop(&mut self) { self.0.state().submitting = false; }
}
