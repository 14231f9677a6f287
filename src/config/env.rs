//! Environment overrides.
//!
//! Empty values are treated the same as unset ones.

/// Environment keys read by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoskyEnv {
    /// Base API URL override.
    Uri,
    /// Project identifier override.
    ProjectId,
    /// Destination language for `upload`.
    UploadLanguage,
}

impl TwoskyEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uri => "TWOSKY_URI",
            Self::ProjectId => "TWOSKY_PROJECT_ID",
            Self::UploadLanguage => "UPLOAD_LANGUAGE",
        }
    }
}

/// Values taken from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub uri: Option<String>,
    pub project_id: Option<String>,
    pub upload_language: Option<String>,
}

impl EnvOverrides {
    /// Reads all overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            uri: read_env_nonempty(TwoskyEnv::Uri),
            project_id: read_env_nonempty(TwoskyEnv::ProjectId),
            upload_language: read_env_nonempty(TwoskyEnv::UploadLanguage),
        }
    }
}

/// Reads a variable, mapping empty and non-UTF-8 values to `None`.
fn read_env_nonempty(key: TwoskyEnv) -> Option<String> {
    match std::env::var(key.as_str()) {
        Ok(value) if value.is_empty() => None,
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(key = key.as_str(), "Ignoring non UTF-8 environment value");
            None
        }
    }
}
