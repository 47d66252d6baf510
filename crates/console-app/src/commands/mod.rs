use super::*;

pub mod article;
pub mod create_article;
pub mod libraries;
pub mod login;
pub mod open;

pub use article::article;
pub use create_article::{create_article, CreateArticleArgs};
pub use libraries::{libraries, LibrariesArgs};
pub use login::{login, LoginArgs};
pub use open::open;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Launch the Terminal User Interface (default when no command specified)
  #[cfg(feature = "tui")]
  #[clap(hide = true)] // Hide from help since it's the default
  Tui,

  /// Open a page by its path and print it
  Open {
    /// Page path, for example "/dashboard" or "/libraries"
    path: String,
  },

  /// Fill in and submit the login form
  Login(LoginArgs),

  /// Fill in and submit the create-article form
  CreateArticle(CreateArticleArgs),

  /// Browse the library, optionally searching and paging
  Libraries(LibrariesArgs),

  /// Read the knowledge-base article
  Article {
    /// Show the article markup literally instead of trusting it
    #[arg(long)]
    escape: bool,
  },
}

/// Sets every field from `values`, then submits the form to `handler`.
///
/// Field errors are replied and turned into [`ConsoleAppError::Rejected`]. A failing handler is
/// replied as an error notice and its error returned.
pub async fn submit_form<M, H, I>(
  interaction: &I,
  values: &[(&str, String)],
  handler: &H,
) -> Result<H::Output>
where
  M: FormModel,
  H: SubmitHandler<M>,
  I: UserInteraction,
{
  let form = ValidatedForm::<M>::new();
  for (name, value) in values {
    form.set_field(name, value.as_str())?;
  }
  trace!(valid = form.is_valid(), "form filled in");

  match form.submit(handler).await {
    SubmitOutcome::Accepted(output) => Ok(output),
    SubmitOutcome::Rejected(errors) => {
      interaction.reply(ResponseContent::Form(form.schema(), &form.snapshot()))?;
      interaction.reply(ResponseContent::FieldErrors(&errors))?;
      Err(ConsoleAppError::Rejected(errors.len()))
    },
    SubmitOutcome::CollaboratorFailed(e) => {
      interaction.reply(ResponseContent::Notice(
        &Notice::error("Submit failed, your input was kept.").with_description(e.to_string()),
      ))?;
      Err(e.into())
    },
    SubmitOutcome::Ignored => Err(ConsoleAppError::Busy),
  }
}

/// Shows where a successful submit leads.
pub fn reply_redirect<I: UserInteraction>(interaction: &I, redirect: &Redirect) -> Result<()> {
  if let Some(notice) = &redirect.notice {
    interaction.reply(ResponseContent::Notice(notice))?;
  }
  interaction.reply(ResponseContent::Redirect(redirect))
}
