//! Command line interface.

use std::io::Write;
use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};

use crate::client::TwoskyClient;
use crate::config::{
    DEFAULT_CONFIG_FILE,
    DEFAULT_LOCALES_DIR,
    DEFAULT_SOURCE_DIR,
    Paths,
    Settings,
};
use crate::download::{
    DownloadCoordinator,
    WorkerCount,
};
use crate::error::Error;
use crate::locale::LocaleStore;
use crate::summary::summarize;
use crate::unused::{
    ScanError,
    SourceMatcher,
    UnusedScanner,
};
use crate::upload::upload;

/// Synchronizes the web client's locale files with Twosky.
#[derive(Parser, Debug)]
#[command(name = "translations", version, subcommand_required = true)]
pub struct Cli {
    /// Twosky configuration file
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding `<code>.json` locale files
    #[arg(long, global = true, value_name = "DIR", default_value = DEFAULT_LOCALES_DIR)]
    pub locales_dir: PathBuf,

    /// Directory searched by `unused`
    #[arg(long, global = true, value_name = "DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the translation completeness of every language
    Summary,
    /// Download the translations of every language
    Download {
        /// Number of concurrent workers
        #[arg(
            short = 'n',
            long,
            default_value_t = 1,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(1..)
        )]
        count: i64,
    },
    /// Print the base file labels not found in the sources
    Unused,
    /// Upload the base file
    Upload,
}

impl Cli {
    #[must_use]
    pub fn paths(&self) -> Paths {
        Paths {
            config_file: self.config.clone(),
            locales_dir: self.locales_dir.clone(),
            source_dir: self.source_dir.clone(),
        }
    }
}

/// Exit status for a failed parse: help and version requests succeed,
/// usage errors fail.
#[must_use]
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    u8::from(err.use_stderr())
}

/// Runs `command`, writing its output to `out`.
///
/// # Errors
/// Returns the first fatal error of the command. Per-language download
/// failures are not fatal.
pub async fn run(command: &Command, settings: &Settings, out: &mut impl Write) -> Result<(), Error> {
    let store = LocaleStore::new(&settings.locales_dir);

    match command {
        Command::Summary => {
            for row in summarize(&store, &settings.languages, &settings.base_file_lang)? {
                writeln!(out, "{row}")?;
            }
        }
        Command::Download { count } => {
            let workers = WorkerCount::new(*count)?;
            let coordinator = DownloadCoordinator::new(TwoskyClient::new()?, store, settings);
            let report = coordinator.run(&settings.languages, workers).await;
            tracing::info!(
                attempted = report.attempted,
                written = report.written.len(),
                "Download finished"
            );
            for path in &report.written {
                writeln!(out, "{}", path.display())?;
            }
        }
        Command::Unused => {
            let matcher =
                SourceMatcher::new(&settings.source_dir, &settings.locales_dir).map_err(ScanError::from)?;
            for label in UnusedScanner::new(matcher).run(&store, &settings.base_file_lang)? {
                writeln!(out, "{label}")?;
            }
        }
        Command::Upload => {
            upload(&TwoskyClient::new()?, &store, settings).await?;
        }
    }

    out.flush()?;
    Ok(())
}
