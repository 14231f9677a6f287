//! 翻訳の進捗サマリー
//!
//! 各言語のキー数をベースファイルのキー数と比較する。
//! キーの照合はせず、単純に件数の比率を取る。

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

use crate::locale::{
    LocaleError,
    LocaleStore,
};
use crate::types::{
    LangCode,
    Languages,
};

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("summary: base locale {0} has no labels")]
    EmptyBase(LangCode),

    #[error("summary: reading locales: {0}")]
    Locale(#[from] LocaleError),
}

/// 1 言語分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub lang: LangCode,
    /// 完成度 (0.01% 単位)
    pub hundredths: u64,
}

impl fmt::Display for SummaryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = format!("{}.{:02}", self.hundredths / 100, self.hundredths % 100);
        write!(f, "{}\t {percent:>6} %", self.lang)
    }
}

/// `lang_count / base_count * 100` を小数点以下 2 桁に丸めた値を
/// 0.01% 単位で返す
///
/// ちょうど中間の値は偶数側に丸める (99.625 -> 99.62, 0.375 -> 0.38)。
///
/// `base_count` が 0 の場合は `None`
#[must_use]
pub fn completeness(lang_count: usize, base_count: usize) -> Option<u64> {
    if base_count == 0 {
        return None;
    }

    let lang = lang_count as u128;
    let base = base_count as u128;
    let scaled = lang * 10_000;
    let (quotient, remainder) = (scaled / base, scaled % base);
    let rounded = match (remainder * 2).cmp(&base) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + quotient % 2,
    };

    Some(u64::try_from(rounded).unwrap_or(u64::MAX))
}

/// ベース言語以外の全言語について完成度を計算する
///
/// 結果は言語コード順。ベースファイルが空の場合は比率が定義できないため、
/// 無限大や NaN を表示せずに [`SummaryError::EmptyBase`] を返す。
///
/// # Errors
/// - ロケールファイルの読み込みエラー
/// - ベースファイルが空
pub fn summarize(
    store: &LocaleStore,
    languages: &Languages,
    base_lang: &LangCode,
) -> Result<Vec<SummaryRow>, SummaryError> {
    let base_count = store.read(base_lang)?.len();
    tracing::debug!(base = %base_lang, labels = base_count, "Loaded base locale");

    let mut rows = Vec::with_capacity(languages.len());
    for lang in languages.keys().filter(|lang| *lang != base_lang) {
        let count = store.read(lang)?.len();
        let hundredths = completeness(count, base_count)
            .ok_or_else(|| SummaryError::EmptyBase(base_lang.clone()))?;
        rows.push(SummaryRow { lang: lang.clone(), hundredths });
    }

    Ok(rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::write_locale;

    fn languages(codes: &[&str]) -> Languages {
        codes.iter().map(|code| (LangCode::from(*code), (*code).to_string())).collect()
    }

    fn labels(count: usize) -> String {
        let entries: Vec<String> = (0..count).map(|i| format!(r#""label_{i}": "text""#)).collect();
        format!("{{{}}}", entries.join(", "))
    }

    #[rstest]
    #[case::half(5, 10, Some(5_000))]
    #[case::complete(10, 10, Some(10_000))]
    #[case::empty_lang(0, 10, Some(0))]
    #[case::third(1, 3, Some(3_333))]
    #[case::two_thirds(2, 3, Some(6_667))]
    #[case::more_than_base(12, 10, Some(12_000))]
    #[case::tie_rounds_down_to_even(797, 800, Some(9_962))]
    #[case::small_tie_rounds_down_to_even(1, 800, Some(12))]
    #[case::tie_rounds_up_to_even(3, 800, Some(38))]
    #[case::empty_base(3, 0, None)]
    fn test_completeness(
        #[case] lang: usize,
        #[case] base: usize,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(completeness(lang, base), expected);
    }

    #[rstest]
    #[case::half(5_000, "fr\t  50.00 %")]
    #[case::full(10_000, "fr\t 100.00 %")]
    #[case::small(7, "fr\t   0.07 %")]
    fn test_row_display(#[case] hundredths: u64, #[case] expected: &str) {
        let row = SummaryRow { lang: LangCode::from("fr"), hundredths };

        assert_eq!(row.to_string(), expected);
    }

    #[googletest::test]
    fn test_summarize_skips_base_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en", &labels(10));
        write_locale(temp_dir.path(), "ru", &labels(10));
        write_locale(temp_dir.path(), "de", &labels(5));

        let rows = summarize(
            &LocaleStore::new(temp_dir.path()),
            &languages(&["ru", "en", "de"]),
            &LangCode::from("en"),
        )
        .unwrap();

        expect_that!(
            rows.iter().map(ToString::to_string).collect::<Vec<_>>(),
            elements_are![eq("de\t  50.00 %"), eq("ru\t 100.00 %")]
        );
    }

    #[rstest]
    fn test_summarize_missing_language_file() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en", &labels(2));

        let result = summarize(
            &LocaleStore::new(temp_dir.path()),
            &languages(&["en", "fr"]),
            &LangCode::from("en"),
        );

        assert!(matches!(result, Err(SummaryError::Locale(LocaleError::NotFound { .. }))));
    }

    #[rstest]
    fn test_summarize_empty_base() {
        let temp_dir = TempDir::new().unwrap();
        write_locale(temp_dir.path(), "en", "{}");
        write_locale(temp_dir.path(), "fr", &labels(1));

        let result = summarize(
            &LocaleStore::new(temp_dir.path()),
            &languages(&["en", "fr"]),
            &LangCode::from("en"),
        );

        assert!(matches!(result, Err(SummaryError::EmptyBase(_))));
    }
}
