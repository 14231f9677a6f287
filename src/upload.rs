//! Base file upload.

use thiserror::Error;
use url::Url;

use crate::client::{
    ClientError,
    Endpoint,
    TwoskyClient,
    translation_url,
};
use crate::config::{
    ConfigError,
    Settings,
};
use crate::locale::{
    LocaleError,
    LocaleStore,
};

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("upload: {0}")]
    Locale(#[from] LocaleError),

    #[error("upload: {0}")]
    Client(#[from] ClientError),

    #[error("upload: {0}")]
    Config(#[from] ConfigError),
}

/// Uploads the raw base file as the translation for [`Settings::upload_target`].
///
/// Returns the URL the file was posted to.
///
/// # Errors
/// - Neither `UPLOAD_LANGUAGE` nor `base_locale` names a language
/// - The base file cannot be read
/// - The request fails or is answered with a status other than 200
pub async fn upload(
    client: &TwoskyClient,
    store: &LocaleStore,
    settings: &Settings,
) -> Result<Url, UploadError> {
    let language = settings.upload_target()?;
    let payload = store.read_raw(&settings.base_file_lang)?;
    let url = translation_url(
        &Endpoint::Upload.url(&settings.base_uri),
        &settings.base_file_name(),
        &settings.project_id,
        language,
    );

    client.post(&url, payload).await?;
    tracing::info!(%url, "Uploaded base translation");

    Ok(url)
}
