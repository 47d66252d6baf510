//! Module for the "login" command.

use console_core::form::{login::MockLogin, LoginCredentials};

use super::*;

/// Arguments for [`Commands::Login`]. Anything left out is prompted for.
#[derive(Args, Clone)]
pub struct LoginArgs {
  /// Email address
  #[arg(long)]
  pub email: Option<String>,

  /// Password; prompted for without echo when left out
  #[arg(long)]
  pub password: Option<String>,
}

/// Function for the [`Commands::Login`] in the CLI.
pub async fn login<I: UserInteraction>(interaction: &I, args: LoginArgs) -> Result<()> {
  let LoginArgs { email, password } = args;
  let email = match email {
    Some(email) => email,
    None => interaction.prompt("Email Address")?,
  };
  let password = match password {
    Some(password) => password,
    None => interaction.prompt_password("Password")?,
  };

  let redirect = submit_form::<LoginCredentials, _, _>(
    interaction,
    &[("email", email), ("password", password)],
    &MockLogin,
  )
  .await?;
  reply_redirect(interaction, &redirect)
}
