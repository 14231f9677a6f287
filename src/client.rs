//! Twosky HTTP client.
//!
//! Builds the download/upload URLs and talks to the service for a single
//! language at a time.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use url::Url;

use crate::types::LangCode;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on a downloaded translation body (1 MiB).
pub const READ_LIMIT: usize = 1024 * 1024;

/// Query parameters owned by [`translation_url`].
const MANAGED_PARAMS: [&str; 4] = ["format", "filename", "project", "language"];

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("requesting: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("url: {url:?}; status code: {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("response body exceeds the limit of {limit} bytes")]
    SizeLimit { limit: usize },
}

/// Service actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Download,
    Upload,
}

impl Endpoint {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Upload => "upload",
        }
    }

    /// Appends the action path segment to the base API URL.
    ///
    /// `base` must be able to carry path segments; [`crate::config::Settings`]
    /// only admits such URLs.
    #[must_use]
    pub fn url(self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(self.as_str());
        }
        url
    }
}

/// Returns `action_url` with the four managed query parameters set.
///
/// Other query parameters already present are kept in their original order.
#[must_use]
pub fn translation_url(
    action_url: &Url,
    file_name: &str,
    project_id: &str,
    lang: &LangCode,
) -> Url {
    let preserved: Vec<(String, String)> = action_url
        .query_pairs()
        .filter(|(key, _)| !MANAGED_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = action_url.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(&preserved)
        .append_pair("format", "json")
        .append_pair("filename", file_name)
        .append_pair("project", project_id)
        .append_pair("language", lang.as_str());
    url
}

/// Reads the `language` query parameter back from a translation URL.
#[must_use]
pub fn language_of(url: &Url) -> Option<LangCode> {
    url.query_pairs()
        .find(|(key, _)| key == "language")
        .map(|(_, value)| LangCode::from(value.into_owned()))
}

/// Client for the translation service.
#[derive(Debug, Clone)]
pub struct TwoskyClient {
    http: reqwest::Client,
    /// Largest accepted response body in bytes.
    max_body: usize,
}

impl TwoskyClient {
    /// Creates a client with the default timeout and body limit.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_limits(REQUEST_TIMEOUT, READ_LIMIT)
    }

    /// # Errors
    /// Returns [`ClientError::Transport`] if the TLS backend cannot be initialized.
    pub fn with_limits(timeout: Duration, max_body: usize) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, max_body })
    }

    /// GETs `url` and returns the body.
    ///
    /// # Errors
    /// - Network failure or timeout
    /// - Status other than 200
    /// - Body larger than the configured limit
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, ClientError> {
        tracing::debug!(%url, "GET");
        let mut response = self.http.get(url.clone()).send().await?;
        check_status(url, response.status())?;

        read_limited(&mut response, self.max_body).await
    }

    /// POSTs `payload` as JSON to `url`.
    ///
    /// # Errors
    /// - Network failure or timeout
    /// - Status other than 200
    pub async fn post(&self, url: &Url, payload: Vec<u8>) -> Result<(), ClientError> {
        tracing::debug!(%url, bytes = payload.len(), "POST");
        let response = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        check_status(url, response.status())
    }
}

/// Only 200 counts as success.
fn check_status(url: &Url, status: StatusCode) -> Result<(), ClientError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(ClientError::HttpStatus { url: url.to_string(), status })
    }
}

/// Reads the response body, failing instead of truncating past `limit`.
async fn read_limited(
    response: &mut reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ClientError> {
    let limit_u64 = u64::try_from(limit).unwrap_or(u64::MAX);
    if let Some(expected) = response.content_length()
        && expected > limit_u64
    {
        return Err(ClientError::SizeLimit { limit });
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len().saturating_add(chunk.len()) > limit {
            return Err(ClientError::SizeLimit { limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
