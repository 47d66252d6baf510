//! The create-article form, its categories and the in-memory article store.

use std::sync::Mutex;

use super::*;

/// Category of a knowledge-base article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArticleCategory {
  /// General information
  General,
  /// Step-by-step technical guide
  TechnicalGuide,
  /// Frequently asked questions
  Faq,
  /// Known problems and fixes
  Troubleshooting,
  /// Release notes and announcements
  ProductUpdate,
}

impl ArticleCategory {
  /// Every category, in display order.
  pub const ALL: [ArticleCategory; 5] = [
    ArticleCategory::General,
    ArticleCategory::TechnicalGuide,
    ArticleCategory::Faq,
    ArticleCategory::Troubleshooting,
    ArticleCategory::ProductUpdate,
  ];

  /// Value submitted by the category select.
  pub fn value(self) -> &'static str {
    match self {
      ArticleCategory::General => "general",
      ArticleCategory::TechnicalGuide => "technical-guide",
      ArticleCategory::Faq => "faq",
      ArticleCategory::Troubleshooting => "troubleshooting",
      ArticleCategory::ProductUpdate => "product-update",
    }
  }

  /// Text shown for the category.
  pub fn label(self) -> &'static str {
    match self {
      ArticleCategory::General => "General",
      ArticleCategory::TechnicalGuide => "Technical Guide",
      ArticleCategory::Faq => "FAQ",
      ArticleCategory::Troubleshooting => "Troubleshooting",
      ArticleCategory::ProductUpdate => "Product Update",
    }
  }
}

impl Display for ArticleCategory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.label()) }
}

impl FromStr for ArticleCategory {
  type Err = ConsoleError;

  fn from_str(s: &str) -> Result<Self> {
    ArticleCategory::ALL.into_iter().find(|category| category.value() == s).ok_or_else(|| {
      ConsoleError::InvalidField { field: "category".into(), message: format!("Unknown category '{s}'") }
    })
  }
}

/// Validated input of the create-article form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
  /// Title of at least two characters
  pub title:    String,
  /// One of the fixed categories
  pub category: ArticleCategory,
  /// Body of at least ten characters
  pub content:  String,
  /// Comma-separated tag input, trimmed, empties dropped
  pub tags:     Vec<String>,
}

/// Splits comma-separated tag input into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
  input.split(',').map(str::trim).filter(|tag| !tag.is_empty()).map(str::to_owned).collect()
}

impl FormModel for NewArticle {
  fn schema() -> FormSchema {
    let options: Vec<SelectOption> = ArticleCategory::ALL
      .into_iter()
      .map(|category| SelectOption::new(category.value(), category.label()))
      .collect();
    let values: Vec<String> = options.iter().map(|option| option.value.clone()).collect();

    FormSchema::new("Create New Knowledge Base Article", "Save Article")
      .with_description("Fill in the details below to create a new article.")
      .with_busy_label("Saving...")
      .with_field(
        FieldSpec::new("title", "Article Title", FieldKind::Text)
          .placeholder("Enter article title")
          .description("A clear and concise title for your article.")
          .rule(Rule::min_length(2, "Title must be at least 2 characters.")),
      )
      .with_field(
        FieldSpec::new("category", "Category", FieldKind::Select { options })
          .placeholder("Select a category")
          .description("Choose the most relevant category for this article.")
          .rule(Rule::one_of(values, "Please select a category.")),
      )
      .with_field(
        FieldSpec::new("content", "Article Content", FieldKind::TextArea)
          .placeholder("Write your article content here...")
          .description("The main body of your article.")
          .rule(Rule::min_length(10, "Content must be at least 10 characters.")),
      )
      .with_field(
        FieldSpec::new("tags", "Tags (Optional)", FieldKind::Text)
          .placeholder("e.g., setup, configuration, new-feature")
          .description("Comma-separated tags to help users find this article."),
      )
  }

  fn from_values(values: &FormValues) -> Result<Self> {
    Ok(Self {
      title:    values.require("title")?.to_string(),
      category: values.require("category")?.parse()?,
      content:  values.require("content")?.to_string(),
      tags:     parse_tags(values.get("tags").unwrap_or_default()),
    })
  }
}

/// Where the cancel button of the create-article page leads.
pub fn cancel() -> Redirect { Redirect::to(Route::Dashboard) }

/// Keeps created articles in memory and sends the user to the knowledge base.
#[derive(Debug, Default)]
pub struct MockArticleStore {
  /// Every article accepted so far, oldest first
  articles: Mutex<Vec<NewArticle>>,
}

impl MockArticleStore {
  /// Creates an empty store.
  pub fn new() -> Self { Self::default() }

  /// Copies of every stored article, oldest first.
  pub fn articles(&self) -> Vec<NewArticle> {
    self.articles.lock().map(|articles| articles.clone()).unwrap_or_default()
  }
}

#[async_trait]
impl SubmitHandler<NewArticle> for MockArticleStore {
  type Output = Redirect;

  async fn submit(&self, article: &NewArticle) -> Result<Redirect> {
    self
      .articles
      .lock()
      .map_err(|_| ConsoleError::Collaborator("article store is unavailable".into()))?
      .push(article.clone());
    info!(title = %article.title, category = article.category.value(), "article created");

    Ok(Redirect::to(Route::KnowledgeBase).with_notice(
      Notice::success("Knowledge base article created successfully!")
        .with_description(format!("Title: {}", article.title)),
    ))
  }
}
