//! 実行時設定の解決を行うモジュール
//!
//! `.twosky.json`、環境変数、コマンドラインのパス指定をまとめて
//! 一つの [`Settings`] にする。各コンポーネントはこれを明示的に受け取る。

use std::path::PathBuf;

use url::Url;

use super::env::EnvOverrides;
use super::{
    ConfigError,
    TwoskyConf,
    ValidationError,
    loader,
};
use crate::types::{
    LangCode,
    Languages,
};

pub const DEFAULT_CONFIG_FILE: &str = "./.twosky.json";
pub const DEFAULT_LOCALES_DIR: &str = "./client/src/__locales";
pub const DEFAULT_SOURCE_DIR: &str = "./client/src";
pub const DEFAULT_PROJECT_ID: &str = "home";
pub const DEFAULT_TWOSKY_URI: &str = "https://twosky.int.agrd.dev/api/v1";
/// ベースファイル (`en.json`) の言語コード
pub const BASE_FILE_LANG: &str = "en";

/// ファイルシステム上の配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub config_file: PathBuf,
    pub locales_dir: PathBuf,
    pub source_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            locales_dir: PathBuf::from(DEFAULT_LOCALES_DIR),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
        }
    }
}

/// 解決済みの設定
#[derive(Debug, Clone)]
pub struct Settings {
    /// Twosky API のベース URL
    pub base_uri: Url,
    pub project_id: String,
    pub languages: Languages,
    /// `.twosky.json` の `base_locale`
    pub base_locale: LangCode,
    /// `UPLOAD_LANGUAGE` による上書き
    pub upload_language: Option<LangCode>,
    /// ベースファイルの言語。summary ではこの言語を除外する
    pub base_file_lang: LangCode,
    pub locales_dir: PathBuf,
    pub source_dir: PathBuf,
}

impl Settings {
    /// 設定ファイルを読み込んで設定を解決する
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    /// - 不正な `TWOSKY_URI`
    pub fn load(paths: Paths, env: &EnvOverrides) -> Result<Self, ConfigError> {
        let conf = loader::load_from_file(&paths.config_file)?;
        tracing::debug!("Loaded configuration: {:?}", conf);

        Self::from_conf(conf, paths, env)
    }

    /// 読み込み済みの設定から解決する
    ///
    /// # Errors
    /// - バリデーションエラー
    /// - 不正な `TWOSKY_URI`
    pub fn from_conf(
        conf: TwoskyConf,
        paths: Paths,
        env: &EnvOverrides,
    ) -> Result<Self, ConfigError> {
        conf.validate().map_err(ConfigError::ValidationErrors)?;

        let uri = env.uri.as_deref().unwrap_or(DEFAULT_TWOSKY_URI);
        let base_uri = Url::parse(uri)
            .map_err(|source| ConfigError::InvalidUri { uri: uri.to_string(), source })?;
        if base_uri.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedUri(uri.to_string()));
        }

        let project_id = env.project_id.clone().unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string());

        Ok(Self {
            base_uri,
            project_id,
            languages: conf.languages,
            base_locale: conf.base_locale,
            upload_language: env.upload_language.clone().map(LangCode::from),
            base_file_lang: LangCode::from(BASE_FILE_LANG),
            locales_dir: paths.locales_dir,
            source_dir: paths.source_dir,
        })
    }

    /// ベースファイル名 (`en.json`)
    #[must_use]
    pub fn base_file_name(&self) -> String {
        format!("{}.json", self.base_file_lang)
    }

    /// アップロード先の言語
    ///
    /// `UPLOAD_LANGUAGE` がなければ `base_locale` を使う。
    ///
    /// # Errors
    /// どちらも空の場合は [`ConfigError::ValidationErrors`]
    pub fn upload_target(&self) -> Result<&LangCode, ConfigError> {
        match &self.upload_language {
            Some(language) => Ok(language),
            None if self.base_locale.is_empty() => {
                Err(ConfigError::ValidationErrors(vec![ValidationError::new(
                    "base_locale",
                    "The base locale cannot be empty. Example: \"en\"",
                )]))
            }
            None => Ok(&self.base_locale),
        }
    }
}
