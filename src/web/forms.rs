//! Submitted form data and its validation.
//!
//! Every field defaults to an empty string so a missing field is reported as
//! a validation failure rather than rejected by the extractor. A body that
//! does not parse at all is treated the same as an empty form. Lengths are
//! counted in characters; required-ness ignores surrounding whitespace.

use axum::{extract::rejection::FormRejection, Form};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 30;
pub const TITLE_MAX_LEN: usize = 80;
pub const SUBTITLE_MAX_LEN: usize = 200;

/// Name/password pair used by both login and registration
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub content: String,
}

/// Field-level validation failures, keyed by field name
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for {}", self.fields().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) -> &mut Self {
        self.errors.entry(field).or_default().push(message.into());
        self
    }

    /// Record the outcome of a single-field check
    pub fn check(&mut self, field: &'static str, result: Result<(), String>) -> &mut Self {
        if let Err(message) = result {
            self.add(field, message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.keys().copied().collect()
    }

    /// Ok if nothing was recorded
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// The submitted form, or an empty one when the body was not a usable
/// urlencoded form (wrong or missing content type, duplicate fields)
pub fn submitted<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Unreadable form body, treating as empty: {}", rejection);
            T::default()
        }
    }
}

pub fn validate_required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", label));
    }
    Ok(())
}

pub fn validate_length(value: &str, label: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!("{} is too short (min {} characters)", label, min));
    }
    if len > max {
        return Err(format!("{} is too long (max {} characters)", label, max));
    }
    Ok(())
}

impl CredentialsForm {
    /// Names are stored and matched without surrounding whitespace
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(
            "name",
            validate_required(&self.name, "Name")
                .and_then(|_| validate_length(&self.name, "Name", NAME_MIN_LEN, NAME_MAX_LEN)),
        );
        errors.check("password", validate_required(&self.password, "Password"));

        errors.finish()
    }
}

impl ArticleForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(
            "title",
            validate_required(&self.title, "Title")
                .and_then(|_| validate_length(&self.title, "Title", 0, TITLE_MAX_LEN)),
        );
        errors.check(
            "subtitle",
            validate_required(&self.subtitle, "Subtitle")
                .and_then(|_| validate_length(&self.subtitle, "Subtitle", 0, SUBTITLE_MAX_LEN)),
        );
        errors.check("content", validate_required(&self.content, "Content"));

        errors.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(name: &str, password: &str) -> CredentialsForm {
        CredentialsForm {
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    fn article(title: &str, subtitle: &str, content: &str) -> ArticleForm {
        ArticleForm {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_credentials_valid() {
        assert!(credentials("bob", "x").validate().is_ok());
        assert!(credentials("alice", "secret123").validate().is_ok());
        assert!(credentials(&"n".repeat(30), "pw").validate().is_ok());
    }

    #[test]
    fn test_credentials_name_bounds() {
        let err = credentials("al", "pw").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["name"]);
        assert!(err.errors["name"][0].contains("too short"));

        let err = credentials(&"n".repeat(31), "pw").validate().unwrap_err();
        assert!(err.errors["name"][0].contains("too long"));
    }

    #[test]
    fn test_credentials_name_counts_characters() {
        // three characters, nine bytes
        assert!(credentials("日本語", "pw").validate().is_ok());
        assert!(credentials(&"é".repeat(30), "pw").validate().is_ok());
    }

    #[test]
    fn test_credentials_required() {
        let err = credentials("", "").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["name", "password"]);
        assert_eq!(err.errors["name"], vec!["Name is required".to_string()]);

        let err = credentials("   ", "pw").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["name"]);

        let err = credentials("alice", "  ").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["password"]);
    }

    #[test]
    fn test_article_valid() {
        assert!(article("Hi", "intro", "hello world").validate().is_ok());
        assert!(article(&"t".repeat(80), &"s".repeat(200), "c").validate().is_ok());
    }

    #[test]
    fn test_article_required() {
        let err = article("", "", "").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["content", "subtitle", "title"]);

        let err = article("Hi", "intro", "\n\t").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["content"]);
    }

    #[test]
    fn test_article_length_caps() {
        let err = article(&"t".repeat(81), "intro", "c").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);

        let err = article("Hi", &"s".repeat(201), "c").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["subtitle"]);

        // content is unbounded
        assert!(article("Hi", "intro", &"c".repeat(100_000)).validate().is_ok());
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "Title is required");
        errors.add("content", "Content is required");
        errors.add("title", "Title is too long");

        assert_eq!(errors.errors["title"].len(), 2);
        assert_eq!(errors.to_string(), "validation failed for content, title");
    }

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let form: CredentialsForm = serde_json::from_str(r#"{"name": "alice"}"#).unwrap();
        assert_eq!(form.name, "alice");
        assert_eq!(form.password, "");
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_normalized_trims_name_only() {
        let form = credentials("  bob \t", " pw ").normalized();
        assert_eq!(form.name, "bob");
        assert_eq!(form.password, " pw ");

        // padding does not count towards the minimum length
        let err = credentials(" ab ", "pw").normalized().validate().unwrap_err();
        assert_eq!(err.fields(), vec!["name"]);
    }
}
