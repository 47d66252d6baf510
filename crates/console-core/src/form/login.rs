//! The login form and its mock handler.

use super::*;

/// Validated login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
  /// Well-formed email address
  pub email:    String,
  /// Password of at least six characters
  pub password: String,
}

impl FormModel for LoginCredentials {
  fn schema() -> FormSchema {
    FormSchema::new("Welcome Back!", "Login")
      .with_description("Enter your credentials to access your Console.")
      .with_busy_label("Logging in...")
      .with_field(
        FieldSpec::new("email", "Email Address", FieldKind::Email)
          .placeholder("you@example.com")
          .rule(Rule::email("Please enter a valid email address.")),
      )
      .with_field(
        FieldSpec::new("password", "Password", FieldKind::Password)
          .placeholder("••••••••")
          .rule(Rule::min_length(6, "Password must be at least 6 characters long.")),
      )
  }

  fn from_values(values: &FormValues) -> Result<Self> {
    Ok(Self {
      email:    values.require("email")?.to_string(),
      password: values.require("password")?.to_string(),
    })
  }
}

/// Accepts any credentials and sends the user to the dashboard.
///
/// There is no authentication behind the console; this handler stands in for one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockLogin;

#[async_trait]
impl SubmitHandler<LoginCredentials> for MockLogin {
  type Output = Redirect;

  async fn submit(&self, credentials: &LoginCredentials) -> Result<Redirect> {
    info!(email = %credentials.email, "mock login");
    Ok(
      Redirect::to(Route::Dashboard)
        .with_notice(Notice::success(format!("Mock Login Success! Email: {}", credentials.email))),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn mock_login_goes_to_dashboard() {
    let credentials =
      LoginCredentials { email: "a@b.com".into(), password: "123456".into() };
    let redirect = MockLogin.submit(&credentials).await.unwrap();
    assert_eq!(redirect.to, Route::Dashboard);
    let notice = redirect.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.title, "Mock Login Success! Email: a@b.com");
  }

  #[test]
  fn schema_order_matches_the_screen() {
    let schema = LoginCredentials::schema();
    let names: Vec<_> = schema.fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(names, ["email", "password"]);
    assert!(schema.field("password").unwrap().kind.is_masked());
  }
}
