//! Core types used throughout the project.

use std::collections::BTreeMap;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// A language code such as `en` or `zh-TW`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LangCode(String);

impl LangCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LangCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LangCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// A text label, i.e. the key of a localized string.
///
/// Labels are opaque: the base language file defines the canonical set.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TextLabel(String);

impl TextLabel {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for TextLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TextLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for TextLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Language code to display name.
pub type Languages = BTreeMap<LangCode, String>;

/// Text label to translated string for one language.
pub type Locales = BTreeMap<TextLabel, String>;
