//! Module for the "create-article" command.

use console_core::form::{article::MockArticleStore, ArticleCategory, NewArticle};

use super::*;

/// Arguments for [`Commands::CreateArticle`]. Anything left out is prompted for.
#[derive(Args, Clone)]
pub struct CreateArticleArgs {
  /// Article title
  #[arg(long)]
  pub title: Option<String>,

  /// Category value: general, technical-guide, faq, troubleshooting or product-update
  #[arg(long)]
  pub category: Option<String>,

  /// Article body
  #[arg(long)]
  pub content: Option<String>,

  /// Comma-separated tags
  #[arg(long)]
  pub tags: Option<String>,
}

/// Function for the [`Commands::CreateArticle`] in the CLI.
pub async fn create_article<I: UserInteraction>(
  interaction: &I,
  args: CreateArticleArgs,
) -> Result<()> {
  let CreateArticleArgs { title, category, content, tags } = args;

  let title = match title {
    Some(title) => title,
    None => interaction.prompt("Article Title")?,
  };
  let category = match category {
    Some(category) => category,
    None => {
      let labels: Vec<_> = ArticleCategory::ALL.iter().map(|category| category.label()).collect();
      let index = interaction.select("Category", &labels)?;
      ArticleCategory::ALL.get(index).map(|category| category.value().to_string()).unwrap_or_default()
    },
  };
  let content = match content {
    Some(content) => content,
    None => interaction.prompt("Article Content")?,
  };
  let tags = match tags {
    Some(tags) => tags,
    None => interaction.prompt("Tags (Optional)")?,
  };

  let store = MockArticleStore::new();
  let redirect = submit_form::<NewArticle, _, _>(
    interaction,
    &[("title", title), ("category", category), ("content", content), ("tags", tags)],
    &store,
  )
  .await?;

  for article in store.articles() {
    let tags = if article.tags.is_empty() { "none".to_string() } else { article.tags.join(", ") };
    interaction.reply(ResponseContent::Info(&format!(
      "{} [{}] tags: {tags}",
      article.title, article.category
    )))?;
  }
  reply_redirect(interaction, &redirect)
}
