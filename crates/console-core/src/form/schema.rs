//! Field rules and form schemas.
//!
//! A [`FormSchema`] is an ordered list of [`FieldSpec`]s. Each field has a semantic
//! [`FieldKind`] (used by front ends to pick an input widget) and zero or more [`Rule`]s.
//! Rules are pure and total: any string either satisfies a rule or violates it with the
//! rule's message.

use super::*;

lazy_static! {
  /// Well-formed email address: a local part, one `@`, and a dotted domain, no whitespace.
  static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
    .expect("email pattern is a valid regex");
}

/// Ordered map of field errors, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// One entry of a selection field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
  /// Value submitted when this option is chosen
  pub value: String,
  /// Text shown to the user
  pub label: String,
}

impl SelectOption {
  /// Creates an option from its value and label.
  pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
    Self { value: value.into(), label: label.into() }
  }
}

/// Semantic type of a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
  /// Single-line free text
  Text,
  /// Email address input
  Email,
  /// Masked input
  Password,
  /// Multi-line free text
  TextArea,
  /// Choice among a fixed set of options
  Select {
    /// Available options, in display order
    options: Vec<SelectOption>,
  },
}

impl FieldKind {
  /// Whether a front end should mask the value while it is typed.
  pub fn is_masked(&self) -> bool { matches!(self, FieldKind::Password) }
}

/// A validation rule attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
  /// The value must be at least `min` characters long.
  MinLength {
    /// Minimum character count
    min:     usize,
    /// Message shown when the rule fails
    message: String,
  },
  /// The value must be a well-formed email address.
  Email {
    /// Message shown when the rule fails
    message: String,
  },
  /// The value must be one of `options` (so the empty string always fails).
  OneOf {
    /// Accepted values
    options: Vec<String>,
    /// Message shown when the rule fails
    message: String,
  },
}

impl Rule {
  /// Rule requiring at least `min` characters.
  pub fn min_length(min: usize, message: impl Into<String>) -> Self {
    Rule::MinLength { min, message: message.into() }
  }

  /// Rule requiring a well-formed email address.
  pub fn email(message: impl Into<String>) -> Self { Rule::Email { message: message.into() } }

  /// Rule requiring a selection from `options`.
  pub fn one_of<I, S>(options: I, message: impl Into<String>) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    Rule::OneOf { options: options.into_iter().map(Into::into).collect(), message: message.into() }
  }

  /// Returns the rule's message if `value` violates it, `None` otherwise.
  ///
  /// Length is counted in characters, not bytes.
  pub fn violation(&self, value: &str) -> Option<&str> {
    let ok = match self {
      Rule::MinLength { min, .. } => value.chars().count() >= *min,
      Rule::Email { .. } => EMAIL_PATTERN.is_match(value),
      Rule::OneOf { options, .. } => options.iter().any(|option| option == value),
    };
    if ok {
      None
    } else {
      Some(self.message())
    }
  }

  /// The message attached to this rule.
  pub fn message(&self) -> &str {
    match self {
      Rule::MinLength { message, .. } | Rule::Email { message } | Rule::OneOf { message, .. } =>
        message,
    }
  }
}

/// Definition of one field of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
  /// Key used by [`ValidatedForm::set_field`]
  pub name:        String,
  /// Label shown next to the input
  pub label:       String,
  /// Semantic type of the input
  pub kind:        FieldKind,
  /// Hint shown while the input is empty
  pub placeholder: Option<String>,
  /// Help text shown under the input
  pub description: Option<String>,
  /// Rules checked in order; the first failure wins
  pub rules:       Vec<Rule>,
}

impl FieldSpec {
  /// Creates a field with no rules, which makes it optional.
  pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
    Self {
      name: name.into(),
      label: label.into(),
      kind,
      placeholder: None,
      description: None,
      rules: Vec::new(),
    }
  }

  /// Sets the placeholder text.
  pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
    self.placeholder = Some(placeholder.into());
    self
  }

  /// Sets the help text.
  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// Appends a rule.
  pub fn rule(mut self, rule: Rule) -> Self {
    self.rules.push(rule);
    self
  }

  /// Whether the field accepts any input, including an empty one.
  pub fn is_optional(&self) -> bool { self.rules.is_empty() }

  /// Checks `value` against every rule, returning the first failure message.
  pub fn check(&self, value: &str) -> Option<String> {
    self.rules.iter().find_map(|rule| rule.violation(value)).map(str::to_owned)
  }
}

/// Ordered field definitions plus the copy a front end shows around them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
  /// Heading of the form card
  pub title:        String,
  /// Short text under the heading
  pub description:  String,
  /// Label of the submit button
  pub submit_label: String,
  /// Label of the submit button while a submit is in flight
  pub busy_label:   String,
  /// Fields in display order
  pub fields:       Vec<FieldSpec>,
}

impl FormSchema {
  /// Creates an empty schema with the given heading and submit label.
  pub fn new(title: impl Into<String>, submit_label: impl Into<String>) -> Self {
    let submit_label = submit_label.into();
    Self {
      title: title.into(),
      description: String::new(),
      busy_label: submit_label.clone(),
      submit_label,
      fields: Vec::new(),
    }
  }

  /// Sets the text under the heading.
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  /// Sets the label shown while submitting.
  pub fn with_busy_label(mut self, busy_label: impl Into<String>) -> Self {
    self.busy_label = busy_label.into();
    self
  }

  /// Appends a field.
  pub fn with_field(mut self, field: FieldSpec) -> Self {
    self.fields.push(field);
    self
  }

  /// Looks a field up by name.
  pub fn field(&self, name: &str) -> Option<&FieldSpec> {
    self.fields.iter().find(|field| field.name == name)
  }

  /// Validates a single named value.
  ///
  /// # Errors
  ///
  /// Returns [`ConsoleError::UnknownField`] if the schema has no such field.
  pub fn check_field(&self, name: &str, value: &str) -> Result<Option<String>> {
    self
      .field(name)
      .map(|field| field.check(value))
      .ok_or_else(|| ConsoleError::UnknownField(name.to_string()))
  }

  /// Validates every field, treating missing values as empty.
  pub fn validate(&self, values: &FormValues) -> FieldErrors {
    self
      .fields
      .iter()
      .filter_map(|field| {
        field.check(values.get(&field.name).unwrap_or_default()).map(|e| (field.name.clone(), e))
      })
      .collect()
  }
}

/// Current string values of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
  /// Empty values for every field of `schema`.
  pub fn empty(schema: &FormSchema) -> Self {
    Self(schema.fields.iter().map(|field| (field.name.clone(), String::new())).collect())
  }

  /// Value of a field, if it has ever been set.
  pub fn get(&self, name: &str) -> Option<&str> { self.0.get(name).map(String::as_str) }

  /// Value of a field, failing if the field is unknown.
  ///
  /// # Errors
  ///
  /// Returns [`ConsoleError::UnknownField`] if no value exists under `name`.
  pub fn require(&self, name: &str) -> Result<&str> {
    self.get(name).ok_or_else(|| ConsoleError::UnknownField(name.to_string()))
  }

  /// Stores a value.
  pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.0.insert(name.into(), value.into());
  }

  /// Iterates over `(name, value)` pairs in name order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn min_length_counts_characters() {
    let rule = Rule::min_length(2, "too short");
    assert_eq!(rule.violation("é"), Some("too short"));
    assert_eq!(rule.violation("éé"), None);
    assert_eq!(rule.violation(""), Some("too short"));
  }

  #[test]
  fn email_rule() {
    let rule = Rule::email("bad email");
    for good in ["a@b.com", "first.last@example.co.uk", "x+tag@host.io"] {
      assert_eq!(rule.violation(good), None, "{good} should pass");
    }
    for bad in ["", "bad", "a@b", "@b.com", "a b@c.com", "a@@b.com"] {
      assert_eq!(rule.violation(bad), Some("bad email"), "{bad} should fail");
    }
  }

  #[test]
  fn one_of_rejects_empty_selection() {
    let rule = Rule::one_of(["general", "faq"], "pick one");
    assert_eq!(rule.violation("faq"), None);
    assert_eq!(rule.violation(""), Some("pick one"));
    assert_eq!(rule.violation("FAQ"), Some("pick one"));
  }

  #[test]
  fn first_failing_rule_wins() {
    let field = FieldSpec::new("code", "Code", FieldKind::Text)
      .rule(Rule::min_length(3, "short"))
      .rule(Rule::one_of(["abcd"], "unknown"));
    assert_eq!(field.check("ab").as_deref(), Some("short"));
    assert_eq!(field.check("abc").as_deref(), Some("unknown"));
    assert_eq!(field.check("abcd"), None);
  }

  #[test]
  fn optional_field_accepts_anything() {
    let field = FieldSpec::new("tags", "Tags", FieldKind::Text);
    assert!(field.is_optional());
    assert_eq!(field.check(""), None);
  }

  #[test]
  fn unknown_field_is_an_error() {
    let schema = FormSchema::new("Test", "Go")
      .with_field(FieldSpec::new("a", "A", FieldKind::Text).rule(Rule::min_length(1, "req")));
    assert!(matches!(schema.check_field("b", "x"), Err(ConsoleError::UnknownField(name)) if name == "b"));
    assert_eq!(schema.check_field("a", "").unwrap().as_deref(), Some("req"));
  }

  #[test]
  fn validate_treats_missing_values_as_empty() {
    let schema = FormSchema::new("Test", "Go")
      .with_field(FieldSpec::new("a", "A", FieldKind::Text).rule(Rule::min_length(1, "req")))
      .with_field(FieldSpec::new("b", "B", FieldKind::Text));
    let errors = schema.validate(&FormValues::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["a"], "req");
  }
}
