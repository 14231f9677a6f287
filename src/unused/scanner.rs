//! 未使用ラベルの検出
//!
//! ベースロケールのラベルのうち、どのソースファイルにも文字列として
//! 現れないものを列挙する。単語境界は考慮しない単純な部分一致。

use std::collections::BTreeSet;

use memchr::memmem;
use thiserror::Error;

use super::matcher::{
    MatcherError,
    SourceMatcher,
};
use crate::locale::{
    LocaleError,
    LocaleStore,
};
use crate::types::{
    LangCode,
    Locales,
    TextLabel,
};

/// 動的に組み立てられるため検索では見つからないが、使用中のラベル
pub const KNOWN_USED: [&str; 3] =
    ["blocking_mode_refused", "blocking_mode_nxdomain", "blocking_mode_custom_ip"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("unused: {0}")]
    Locale(#[from] LocaleError),

    #[error("unused: {0}")]
    Matcher(#[from] MatcherError),
}

/// 未使用ラベルのスキャナー
#[derive(Debug, Clone)]
pub struct UnusedScanner {
    matcher: SourceMatcher,
    known_used: BTreeSet<TextLabel>,
}

impl UnusedScanner {
    /// [`KNOWN_USED`] を除外リストとして作成
    #[must_use]
    pub fn new(matcher: SourceMatcher) -> Self {
        Self { matcher, known_used: KNOWN_USED.into_iter().map(TextLabel::from).collect() }
    }

    /// 除外リストを置き換える
    #[must_use]
    pub fn with_known_used(mut self, labels: impl IntoIterator<Item = TextLabel>) -> Self {
        self.known_used = labels.into_iter().collect();
        self
    }

    /// ベースロケールを読み込んで未使用ラベルを返す
    ///
    /// # Errors
    /// - ベースファイルの読み込みエラー
    /// - ソースディレクトリが存在しない
    pub fn run(
        &self,
        store: &LocaleStore,
        base_lang: &LangCode,
    ) -> Result<Vec<TextLabel>, ScanError> {
        let base = store.read(base_lang)?;
        self.find_unused(base)
    }

    /// `base` のラベルのうちソースファイルに現れないものを辞書順で返す
    ///
    /// 読み込めないファイルはログに残してスキップする。
    ///
    /// # Errors
    /// ソースディレクトリが存在しない場合
    pub fn find_unused(&self, base: Locales) -> Result<Vec<TextLabel>, ScanError> {
        let mut candidates: BTreeSet<TextLabel> =
            base.into_keys().filter(|label| !self.known_used.contains(label)).collect();

        for file in self.matcher.find_source_files()? {
            if candidates.is_empty() {
                break;
            }

            let content = match std::fs::read(&file) {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!(path = %file.display(), %err, "Skipping unreadable source file");
                    continue;
                }
            };

            candidates.retain(|label| memmem::find(&content, label.as_bytes()).is_none());
        }

        Ok(candidates.into_iter().collect())
    }
}
