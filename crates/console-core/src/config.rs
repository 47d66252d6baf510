//! User configuration.
//!
//! Configuration is a small TOML file. Every key is optional and a missing file is the same
//! as an empty one:
//!
//! ```toml
//! page_size = 6                          # library items per page, at least 1
//! library_path = "/srv/assets.json"      # replaces the bundled sample library
//! markup = "trusted"                     # or "escaped"
//! footer_year = 2024                     # defaults to the current year
//! ```

use chrono::Datelike;

use super::*;
use crate::{article::MarkupPolicy, query::DEFAULT_PAGE_SIZE};

/// Settings for the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Library items per page
  pub page_size:    usize,
  /// JSON file to load library items from instead of the sample set
  #[serde(skip_serializing_if = "Option::is_none")]
  pub library_path: Option<PathBuf>,
  /// How article content is wrapped before rendering
  pub markup:       MarkupPolicy,
  /// Year printed in the footer
  #[serde(skip_serializing_if = "Option::is_none")]
  pub footer_year:  Option<i32>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      page_size:    DEFAULT_PAGE_SIZE,
      library_path: None,
      markup:       MarkupPolicy::default(),
      footer_year:  None,
    }
  }
}

impl Config {
  /// Returns the default location of the configuration file.
  ///
  /// This is `console-app/config.toml` under the platform configuration directory, falling
  /// back to the current directory.
  ///
  /// ```no_run
  /// let path = console_core::config::Config::default_path();
  /// println!("Configuration is read from: {}", path.display());
  /// ```
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("console-app").join("config.toml")
  }

  /// Loads the configuration at `path`. A missing file yields the defaults.
  ///
  /// # Errors
  ///
  /// Returns [`ConsoleError::Io`] if the file exists but cannot be read,
  /// [`ConsoleError::TomlDe`] if it is not valid, and [`ConsoleError::Config`] if a value is
  /// out of range.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      debug!(path = %path.display(), "no config file, using defaults");
      return Ok(Self::default());
    }
    let config = Self::from_toml(&std::fs::read_to_string(path)?)?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
  }

  /// Parses and validates a TOML document.
  ///
  /// # Errors
  ///
  /// Returns [`ConsoleError::TomlDe`] for malformed input and [`ConsoleError::Config`] for
  /// out-of-range values.
  pub fn from_toml(toml: &str) -> Result<Self> {
    let config: Self = toml::from_str(toml)?;
    config.validate()?;
    Ok(config)
  }

  /// Checks value ranges.
  ///
  /// # Errors
  ///
  /// Returns [`ConsoleError::Config`] when `page_size` is zero.
  pub fn validate(&self) -> Result<()> {
    if self.page_size == 0 {
      return Err(ConsoleError::Config("page_size must be at least 1".into()));
    }
    Ok(())
  }

  /// Sets the number of library items per page.
  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size;
    self
  }

  /// Sets the JSON library file.
  pub fn with_library_path(mut self, path: impl AsRef<Path>) -> Self {
    self.library_path = Some(path.as_ref().to_path_buf());
    self
  }

  /// Sets the markup policy for article content.
  pub fn with_markup(mut self, markup: MarkupPolicy) -> Self {
    self.markup = markup;
    self
  }

  /// Pins the footer year.
  pub fn with_footer_year(mut self, year: i32) -> Self {
    self.footer_year = Some(year);
    self
  }

  /// The configured footer year, or the current local year.
  pub fn footer_year(&self) -> i32 {
    self.footer_year.unwrap_or_else(|| chrono::Local::now().year())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_means_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load(dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.page_size, 6);
    assert_eq!(config.markup, MarkupPolicy::Trusted);
  }

  #[test]
  #[traced_test]
  fn file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "page_size = 3\nmarkup = \"escaped\"\nfooter_year = 2020\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.page_size, 3);
    assert_eq!(config.markup, MarkupPolicy::Escaped);
    assert_eq!(config.footer_year(), 2020);
    assert_eq!(config.library_path, None);
    assert!(logs_contain("loaded config"));
  }

  #[test]
  fn zero_page_size_is_rejected() {
    assert!(matches!(Config::from_toml("page_size = 0"), Err(ConsoleError::Config(_))));
    assert!(Config::default().with_page_size(0).validate().is_err());
  }

  #[test]
  fn bad_toml_is_rejected() {
    assert!(matches!(Config::from_toml("page_size = \"six\""), Err(ConsoleError::TomlDe(_))));
    assert!(matches!(Config::from_toml("colour = \"blue\""), Err(ConsoleError::TomlDe(_))));
    assert!(matches!(Config::from_toml("markup = \"raw\""), Err(ConsoleError::TomlDe(_))));
  }

  #[test]
  fn footer_year_defaults_to_now() {
    let year = chrono::Local::now().year();
    assert_eq!(Config::default().footer_year(), year);
  }

  #[test]
  fn default_path_ends_in_app_dir() {
    assert!(Config::default_path().ends_with("console-app/config.toml"));
  }
}
