use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::{
    LangCode,
    Languages,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages.fr")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration file {} is empty", .0.display())]
    Empty(PathBuf),

    #[error("Invalid Twosky URI '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Twosky URI '{0}' cannot be used as a base URL")]
    UnsupportedUri(String),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One entry of the `.twosky.json` array.
///
/// Only the first entry of the array is used.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TwoskyConf {
    /// Language code to display name.
    pub languages: Languages,
    pub project_id: String,
    /// Language the base file is uploaded as unless `UPLOAD_LANGUAGE` is set.
    pub base_locale: LangCode,
    pub localizable_files: Vec<String>,
}

impl TwoskyConf {
    /// `base_locale` is not checked here; only `upload` needs it.
    ///
    /// # Errors
    /// - The language set is empty
    /// - A language code or display name is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.languages.is_empty() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: {\"en\": \"English\"}",
            ));
        }

        for (code, name) in &self.languages {
            if code.is_empty() {
                errors.push(ValidationError::new("languages", "Language code cannot be empty"));
            } else if name.is_empty() {
                errors.push(ValidationError::new(
                    format!("languages.{code}"),
                    "Language is empty. Please specify a display name, for example: \"English\"",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
