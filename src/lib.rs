//! twosky-translations
//!
//! Web クライアントのロケールファイルを Twosky 翻訳サービスと同期するツール

pub mod cli;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod locale;
pub mod summary;
pub mod types;
pub mod unused;
pub mod upload;

#[cfg(test)]
mod test_utils;
