use std::sync::Arc;

use async_trait::async_trait;
use console_core::error::Result;
use tokio::sync::Notify;

use super::*;

/// Wraps [`MockLogin`], counting calls and optionally holding each one until released.
#[derive(Default)]
struct GatedLogin {
  calls: AtomicUsize,
  gate:  Option<Arc<Notify>>,
}

#[async_trait]
impl SubmitHandler<LoginCredentials> for GatedLogin {
  type Output = Redirect;

  async fn submit(&self, credentials: &LoginCredentials) -> Result<Redirect> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(gate) = &self.gate {
      gate.notified().await;
    }
    MockLogin.submit(credentials).await
  }
}

/// Always fails, as an unreachable backend would.
struct Offline;

#[async_trait]
impl SubmitHandler<NewArticle> for Offline {
  type Output = Redirect;

  async fn submit(&self, _: &NewArticle) -> Result<Redirect> {
    Err(ConsoleError::Collaborator("article service is offline".into()))
  }
}

fn login_with(email: &str, password: &str) -> ValidatedForm<LoginCredentials> {
  let form = ValidatedForm::new();
  form.set_field("email", email).unwrap();
  form.set_field("password", password).unwrap();
  form
}

fn article_with(title: &str, content: &str, category: &str) -> ValidatedForm<NewArticle> {
  let form = ValidatedForm::new();
  form.set_field("title", title).unwrap();
  form.set_field("content", content).unwrap();
  form.set_field("category", category).unwrap();
  form
}

#[traced_test]
#[tokio::test]
async fn bad_login_never_reaches_handler() {
  let form = login_with("bad", "12345");
  let handler = GatedLogin::default();

  let SubmitOutcome::Rejected(errors) = form.submit(&handler).await else {
    panic!("expected the submit to be rejected");
  };
  assert_eq!(errors.len(), 2);
  assert_eq!(errors["email"], "Please enter a valid email address.");
  assert_eq!(errors["password"], "Password must be at least 6 characters long.");
  assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
  assert_eq!(form.value("email").as_deref(), Some("bad"));
}

#[tokio::test]
async fn good_login_goes_to_dashboard() -> TestResult<()> {
  let form = login_with("a@b.com", "123456");
  assert!(form.errors().is_empty());
  let handler = GatedLogin::default();

  let redirect = form.submit(&handler).await.accepted().ok_or("login was not accepted")?;
  assert_eq!(redirect.to, Route::Dashboard);
  assert_eq!(redirect.notice.ok_or("missing notice")?.title, "Mock Login Success! Email: a@b.com");
  assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
  Ok(())
}

#[tokio::test]
async fn incomplete_article_reports_every_field() {
  let form = article_with("A", "short", "");
  let store = MockArticleStore::new();

  let SubmitOutcome::Rejected(errors) = form.submit(&store).await else {
    panic!("expected the submit to be rejected");
  };
  assert_eq!(errors.len(), 3);
  assert_eq!(errors["title"], "Title must be at least 2 characters.");
  assert_eq!(errors["content"], "Content must be at least 10 characters.");
  assert_eq!(errors["category"], "Please select a category.");
  assert!(!errors.contains_key("tags"));
  assert!(store.articles().is_empty());
}

#[tokio::test]
async fn complete_article_is_stored() -> TestResult<()> {
  let form = article_with("My Article", "This is sufficiently long content.", "general");
  form.set_field("tags", "intro, , guide")?;
  let store = MockArticleStore::new();

  let redirect = form.submit(&store).await.accepted().ok_or("article was not accepted")?;
  assert_eq!(redirect.to, Route::KnowledgeBase);
  let notice = redirect.notice.ok_or("missing notice")?;
  assert_eq!(notice.title, "Knowledge base article created successfully!");
  assert_eq!(notice.description.as_deref(), Some("Title: My Article"));

  let stored = store.articles();
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0].category, ArticleCategory::General);
  assert_eq!(stored[0].tags, ["intro", "guide"]);
  Ok(())
}

#[tokio::test]
async fn concurrent_submits_call_handler_once() {
  let gate = Arc::new(Notify::new());
  let handler = GatedLogin { calls: AtomicUsize::new(0), gate: Some(gate.clone()) };
  let form = login_with("a@b.com", "123456");

  let (first, second, ()) = futures::join!(form.submit(&handler), form.submit(&handler), async {
    assert!(form.is_submitting());
    assert_eq!(form.submit_label(), "Logging in...");
    gate.notify_one();
  });

  assert!(matches!(first, SubmitOutcome::Accepted(_)));
  assert!(matches!(second, SubmitOutcome::Ignored));
  assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
  assert!(!form.is_submitting());
  assert_eq!(form.submit_label(), "Login");
}

#[tokio::test]
async fn submit_works_again_after_settling() {
  let form = login_with("a@b.com", "123456");
  let handler = GatedLogin::default();
  assert!(form.submit(&handler).await.passed_validation());
  assert!(form.submit(&handler).await.passed_validation());
  assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_handler_keeps_values_for_retry() {
  let form = article_with("My Article", "This is sufficiently long content.", "faq");

  let outcome = form.submit(&Offline).await;
  assert!(matches!(outcome, SubmitOutcome::CollaboratorFailed(ConsoleError::Collaborator(_))));
  assert!(!form.is_submitting());
  assert_eq!(form.value("title").as_deref(), Some("My Article"));

  let store = MockArticleStore::new();
  assert!(form.submit(&store).await.accepted().is_some());
  assert_eq!(store.articles()[0].category, ArticleCategory::Faq);
}

#[test]
fn dropped_submit_clears_the_flag() {
  let gate = Arc::new(Notify::new());
  let handler = GatedLogin { calls: AtomicUsize::new(0), gate: Some(gate) };
  let form = login_with("a@b.com", "123456");

  let mut pending = tokio_test::task::spawn(form.submit(&handler));
  assert!(pending.poll().is_pending());
  assert!(form.is_submitting());
  drop(pending);
  assert!(!form.is_submitting());
}
