//! Entry point for the `translations` tool.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use twosky_translations::cli::{
    self,
    Cli,
};
use twosky_translations::config::{
    EnvOverrides,
    Settings,
};
use twosky_translations::error::Error;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help と usage エラーの出力先は clap が決める
            if let Err(io_err) = err.print() {
                tracing::error!(%io_err, "Failed to print usage");
            }
            return ExitCode::from(cli::usage_exit_code(&err));
        }
    };

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            // ログが無効でも原因は必ず表示する
            let _ = writeln!(std::io::stderr(), "error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// 設定を解決してコマンドを実行する
async fn execute(cli: &Cli) -> Result<(), Error> {
    let settings = Settings::load(cli.paths(), &EnvOverrides::from_env())?;
    tracing::debug!(project = %settings.project_id, uri = %settings.base_uri, "Resolved settings");

    let mut stdout = std::io::stdout().lock();
    cli::run(&cli.command, &settings, &mut stdout).await
}
