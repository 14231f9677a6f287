//! Top-level error for the `translations` binary.

use thiserror::Error;

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::download::WorkerCountError;
use crate::summary::SummaryError;
use crate::unused::ScanError;
use crate::upload::UploadError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("client: {0}")]
    Client(#[from] ClientError),

    #[error("download: {0}")]
    WorkerCount(#[from] WorkerCountError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("writing output: {0}")]
    Output(#[from] std::io::Error),
}
