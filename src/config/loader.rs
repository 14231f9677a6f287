//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    TwoskyConf,
};

/// `.twosky.json` を読み込む
///
/// ファイルは設定オブジェクトの配列で、先頭の要素のみを使用する
///
/// # Arguments
/// * `config_path` - 設定ファイルのパス
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - 配列が空
pub(super) fn load_from_file(config_path: &Path) -> Result<TwoskyConf, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)
        .map_err(|source| ConfigError::IoError { path: config_path.to_path_buf(), source })?;
    let confs: Vec<TwoskyConf> = serde_json::from_str(&content)
        .map_err(|source| ConfigError::ParseError { path: config_path.to_path_buf(), source })?;

    confs.into_iter().next().ok_or_else(|| ConfigError::Empty(config_path.to_path_buf()))
}
