//! Locale file store.
//!
//! Each language lives in `<dir>/<code>.json`, a flat JSON object of
//! text label to translated string.

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::types::{
    LangCode,
    Locales,
};

/// Permission bits for newly created locale files.
#[cfg_attr(not(unix), allow(dead_code))]
const LOCALE_FILE_MODE: u32 = 0o664;

#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Locale file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read locale file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse locale file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write locale file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads and writes the locale files of one directory.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    dir: PathBuf,
}

impl LocaleStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the locale file for `code`.
    #[must_use]
    pub fn path_for(&self, code: &LangCode) -> PathBuf {
        self.dir.join(format!("{code}.json"))
    }

    /// Loads and decodes the locale file for `code`.
    ///
    /// # Errors
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file is not a JSON object of strings
    pub fn read(&self, code: &LangCode) -> Result<Locales, LocaleError> {
        let path = self.path_for(code);
        let content = read_file(&path)?;

        serde_json::from_slice(&content).map_err(|source| LocaleError::Decode { path, source })
    }

    /// Loads the locale file for `code` without decoding it.
    ///
    /// # Errors
    /// - The file does not exist
    /// - The file cannot be read
    pub fn read_raw(&self, code: &LangCode) -> Result<Vec<u8>, LocaleError> {
        read_file(&self.path_for(code))
    }

    /// Replaces the locale file for `code` with `data`.
    ///
    /// The file is created with mode `0o664` when missing.
    ///
    /// # Errors
    /// Returns [`LocaleError::Write`] if the file cannot be created or written.
    pub async fn write(&self, code: &LangCode, data: &[u8]) -> Result<PathBuf, LocaleError> {
        let path = self.path_for(code);

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(LOCALE_FILE_MODE);

        let result = async {
            let mut file = options.open(&path).await?;
            file.write_all(data).await?;
            file.flush().await
        }
        .await;

        match result {
            Ok(()) => Ok(path),
            Err(source) => Err(LocaleError::Write { path, source }),
        }
    }
}

/// Maps a missing file to [`LocaleError::NotFound`].
fn read_file(path: &Path) -> Result<Vec<u8>, LocaleError> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            LocaleError::NotFound { path: path.to_path_buf() }
        } else {
            LocaleError::Read { path: path.to_path_buf(), source }
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::types::TextLabel;

    #[rstest]
    fn test_path_for() {
        let store = LocaleStore::new("./client/src/__locales");

        let path = store.path_for(&LangCode::from("pt-BR"));

        assert_eq!(path, PathBuf::from("./client/src/__locales/pt-BR.json"));
    }

    #[googletest::test]
    fn test_read_locales() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("fr.json"), r#"{"hello": "Bonjour", "bye": "Au revoir"}"#)
            .unwrap();
        let store = LocaleStore::new(temp_dir.path());

        let locales = store.read(&LangCode::from("fr")).unwrap();

        expect_that!(locales.len(), eq(2));
        expect_that!(locales.get(&TextLabel::from("hello")), some(eq(&"Bonjour".to_string())));
    }

    #[rstest]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocaleStore::new(temp_dir.path());

        let result = store.read(&LangCode::from("fr"));

        assert!(matches!(result, Err(LocaleError::NotFound { .. })));
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::array(r#"["hello"]"#)]
    #[case::nested(r#"{"menu": {"open": "Open"}}"#)]
    #[case::number(r#"{"count": 1}"#)]
    fn test_read_invalid_file(#[case] content: &str) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("fr.json"), content).unwrap();
        let store = LocaleStore::new(temp_dir.path());

        let result = store.read(&LangCode::from("fr"));

        assert!(matches!(result, Err(LocaleError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_write_replaces_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("de.json"), r#"{"old": "Alt", "stale": "Abgestanden"}"#)
            .unwrap();
        let store = LocaleStore::new(temp_dir.path());
        let code = LangCode::from("de");

        let path = store.write(&code, br#"{"new": "Neu"}"#).await.unwrap();

        assert_eq!(path, temp_dir.path().join("de.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"new": "Neu"}"#);
        assert_eq!(store.read(&code).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_creates_file_with_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = LocaleStore::new(temp_dir.path());

        let path = store.write(&LangCode::from("es"), b"{}").await.unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask may only clear bits
        assert_eq!(mode & !LOCALE_FILE_MODE, 0);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocaleStore::new(temp_dir.path().join("missing"));

        let result = store.write(&LangCode::from("es"), b"{}").await;

        assert!(matches!(result, Err(LocaleError::Write { .. })));
    }
}
