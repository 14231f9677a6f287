//! Concurrent translation download.
//!
//! One task per configured language is queued on a bounded channel sized to
//! the language count, then a fixed number of workers drain it. Failures are
//! logged per language and never stop the other workers.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{
    Mutex,
    mpsc,
};
use url::Url;

use crate::client::{
    ClientError,
    Endpoint,
    TwoskyClient,
    language_of,
    translation_url,
};
use crate::config::Settings;
use crate::locale::{
    LocaleError,
    LocaleStore,
};
use crate::types::Languages;

/// Number of concurrent download workers (at least one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerCount(NonZeroUsize);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("count must be positive, got {0}")]
pub struct WorkerCountError(pub i64);

impl WorkerCount {
    /// # Errors
    /// Returns [`WorkerCountError`] if `count` is less than one.
    pub fn new(count: i64) -> Result<Self, WorkerCountError> {
        usize::try_from(count)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(WorkerCountError(count))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        Self(NonZeroUsize::MIN)
    }
}

/// Failure of a single language download.
#[derive(Error, Debug)]
enum TaskError {
    #[error("getting translation: {0}")]
    Fetch(#[from] ClientError),

    #[error("no language parameter in {0}")]
    MissingLanguage(Url),

    #[error("writing file: {0}")]
    Write(#[from] LocaleError),
}

/// Outcome of a download run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Number of languages queued.
    pub attempted: usize,
    /// Files that were written, in completion order.
    pub written: Vec<PathBuf>,
}

/// Downloads the base file's translations for every language.
#[derive(Debug, Clone)]
pub struct DownloadCoordinator {
    client: TwoskyClient,
    store: LocaleStore,
    /// `<base>/download`
    download_url: Url,
    /// File name requested for every language.
    base_file: String,
    project_id: String,
}

impl DownloadCoordinator {
    #[must_use]
    pub fn new(client: TwoskyClient, store: LocaleStore, settings: &Settings) -> Self {
        Self {
            client,
            store,
            download_url: Endpoint::Download.url(&settings.base_uri),
            base_file: settings.base_file_name(),
            project_id: settings.project_id.clone(),
        }
    }

    /// One request URL per language.
    #[must_use]
    pub fn task_urls(&self, languages: &Languages) -> Vec<Url> {
        languages
            .keys()
            .map(|lang| {
                translation_url(&self.download_url, &self.base_file, &self.project_id, lang)
            })
            .collect()
    }

    /// Downloads every language with `workers` concurrent workers and waits
    /// for all of them to finish.
    pub async fn run(&self, languages: &Languages, workers: WorkerCount) -> DownloadReport {
        let urls = self.task_urls(languages);
        let attempted = urls.len();

        let (tx, rx) = mpsc::channel(attempted.max(1));
        for url in urls {
            if let Err(err) = tx.try_send(url) {
                tracing::error!(%err, "download: queueing task");
            }
        }
        drop(tx);

        let queue = Arc::new(Mutex::new(rx));
        let handles: Vec<_> = (0..workers.get())
            .map(|id| {
                tokio::spawn(download_worker(
                    id,
                    Arc::clone(&queue),
                    self.client.clone(),
                    self.store.clone(),
                ))
            })
            .collect();

        let mut written = Vec::with_capacity(attempted);
        for result in futures::future::join_all(handles).await {
            match result {
                Ok(paths) => written.extend(paths),
                Err(err) => tracing::error!(%err, "download worker stopped unexpectedly"),
            }
        }

        DownloadReport { attempted, written }
    }
}

/// Pulls URLs until the queue is closed and empty.
async fn download_worker(
    id: usize,
    queue: Arc<Mutex<mpsc::Receiver<Url>>>,
    client: TwoskyClient,
    store: LocaleStore,
) -> Vec<PathBuf> {
    let mut written = Vec::new();

    loop {
        let next = {
            let mut queue = queue.lock().await;
            queue.recv().await
        };
        let Some(url) = next else {
            break;
        };

        match download_one(&client, &store, &url).await {
            Ok(path) => {
                tracing::info!(worker = id, path = %path.display(), "Saved translation");
                written.push(path);
            }
            Err(err) => {
                tracing::error!(worker = id, %url, "download worker: {err}");
            }
        }
    }

    written
}

/// Fetches one translation and writes it under the language of `url`.
async fn download_one(
    client: &TwoskyClient,
    store: &LocaleStore,
    url: &Url,
) -> Result<PathBuf, TaskError> {
    let data = client.fetch(url).await?;
    let lang = language_of(url).ok_or_else(|| TaskError::MissingLanguage(url.clone()))?;

    Ok(store.write(&lang, &data).await?)
}
