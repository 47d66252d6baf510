//! Integration tests for the console-app CLI commands.
//!
//! Each test points `--config` at a file that does not exist, so the defaults apply no matter
//! what the machine running the tests has configured.

use std::path::PathBuf;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

// Helper function to create a clean command instance
fn console_app() -> Result<Command> { Ok(Command::cargo_bin("console-app")?) }

// Helper to get a config path that does not exist yet
fn temp_config() -> Result<(TempDir, PathBuf)> {
  let dir = tempdir()?;
  let config = dir.path().join("config.toml");
  Ok((dir, config))
}

#[test]
fn test_open_dashboard() -> Result<()> {
  let (_dir, config) = temp_config()?;

  console_app()?
    .args(["open", "/dashboard", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Console App › Dashboard"))
    .stdout(predicate::str::contains("Welcome to Your Console"))
    .stdout(predicate::str::contains("No recent activity to display."))
    .stdout(predicate::str::contains("Experience Studio Console"));
  Ok(())
}

#[test]
fn test_open_unknown_path() -> Result<()> {
  let (_dir, config) = temp_config()?;

  console_app()?
    .args(["open", "/nowhere", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Page not found: /nowhere"))
    .stdout(predicate::str::contains("Dashboard").not());
  Ok(())
}

#[test]
fn test_library_search_and_paging() -> Result<()> {
  let (_dir, config) = temp_config()?;

  console_app()?
    .args(["libraries", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Showing 6 of 8 items (page 1 of 2)"))
    .stdout(predicate::str::contains("[1] 2 »"));

  console_app()?
    .args(["libraries", "--page", "2", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Showing 2 of 8 items (page 2 of 2)"))
    .stdout(predicate::str::contains("« 1 [2]"));

  console_app()?
    .args(["libraries", "--search", "annual", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Annual Report 2023"))
    .stdout(predicate::str::contains("Showing 1 of 1 items (page 1 of 1)"));

  console_app()?
    .args(["libraries", "-s", "zzzz", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("No library items found."))
    .stdout(predicate::str::contains("Try adjusting your search terms."));
  Ok(())
}

#[test]
fn test_library_from_file() -> Result<()> {
  let (dir, config) = temp_config()?;
  let library = dir.path().join("library.json");
  std::fs::write(
    &library,
    r#"[{"id": "x1", "kind": "podcast", "title": "Weekly Sync", "description": "Recording"}]"#,
  )?;

  console_app()?
    .args(["libraries", "--library"])
    .arg(&library)
    .arg("--config")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Weekly Sync"))
    .stdout(predicate::str::contains("[unknown]"));
  Ok(())
}

#[test]
fn test_login() -> Result<()> {
  let (_dir, config) = temp_config()?;

  console_app()?
    .args(["login", "--email", "a@b.com", "--password", "123456", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Mock Login Success! Email: a@b.com"))
    .stdout(predicate::str::contains("/dashboard"));
  Ok(())
}

#[test]
fn test_login_rejected() -> Result<()> {
  let (_dir, config) = temp_config()?;

  console_app()?
    .args(["login", "--email", "not-an-email", "--password", "123", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stdout(predicate::str::contains("Please enter a valid email address."))
    .stdout(predicate::str::contains("Password must be at least 6 characters long."))
    .stderr(predicate::str::contains("2 field(s) need attention"));
  Ok(())
}

#[test]
fn test_create_article_with_defaults() -> Result<()> {
  let (_dir, config) = temp_config()?;

  console_app()?
    .args(["create-article", "--title", "Rotating keys", "--content", "Rotate every ninety days."])
    .arg("--accept-defaults")
    .arg("--config")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Knowledge base article created successfully!"))
    .stdout(predicate::str::contains("Rotating keys [General] tags: none"))
    .stdout(predicate::str::contains("/knowledge-base"));
  Ok(())
}

#[test]
fn test_create_article_rejected() -> Result<()> {
  let (_dir, config) = temp_config()?;

  console_app()?
    .args(["create-article", "--title", "x", "--category", "", "--content", "short"])
    .args(["--tags", "", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stdout(predicate::str::contains("Title must be at least 2 characters."))
    .stdout(predicate::str::contains("Please select a category."))
    .stdout(predicate::str::contains("Content must be at least 10 characters."))
    .stderr(predicate::str::contains("3 field(s) need attention"));
  Ok(())
}

#[test]
fn test_article_markup_choice() -> Result<()> {
  let (_dir, config) = temp_config()?;

  console_app()?
    .args(["article", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Dashboard › Knowledge Base › Understanding"))
    .stdout(predicate::str::contains("On this page: Understanding the Console App Interface"))
    .stdout(predicate::str::contains("<h2 id=\"dashboard-section\">"));

  console_app()?
    .args(["article", "--escape", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("&lt;h2"))
    .stdout(predicate::str::contains("<h2").not());
  Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
  let (_dir, config) = temp_config()?;
  std::fs::write(&config, "page_size = 0\n")?;

  console_app()?
    .args(["open", "/libraries", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("page_size"));
  Ok(())
}

#[cfg(not(feature = "tui"))]
#[test]
fn test_no_command() -> Result<()> {
  console_app()?
    .assert()
    .failure()
    .stdout(predicate::str::contains("Please specify a command"));
  Ok(())
}
