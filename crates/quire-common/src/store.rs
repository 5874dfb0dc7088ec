//! The storage collaborator seam.
//!
//! `MediaStore::upload` is infallible by contract: every failure mode
//! (unreadable file, transport error, bad status, malformed body) resolves to
//! [`UploadResult::Failure`] so the caller can fall back to inline data.

use std::future::Future;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::config::StorageConfig;
use crate::error::StoreError;
use crate::media::{MediaFile, resolve_mime};

/// Outcome of one upload attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadResult {
    /// The file is stored remotely at this URL.
    Success(String),
    Failure,
}

impl UploadResult {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Success(url) => Some(url),
            Self::Failure => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Remote storage for captured media.
pub trait MediaStore {
    /// Try to persist `file`. Never fails; no retries.
    fn upload<F: MediaFile>(&self, file: &F) -> impl Future<Output = UploadResult>;
}

impl<S: MediaStore> MediaStore for &S {
    fn upload<F: MediaFile>(&self, file: &F) -> impl Future<Output = UploadResult> {
        (**self).upload(file)
    }
}

/// Body the storage endpoint answers with on success.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
}

/// `MediaStore` that posts files as `multipart/form-data` to an HTTP endpoint
/// and reads `{"url": "..."}` back.
#[derive(Clone, Debug)]
pub struct HttpMediaStore {
    client: reqwest::Client,
    endpoint: Url,
    field_name: String,
}

impl HttpMediaStore {
    /// Build a store with its own client honouring the configured timeout.
    pub fn new(config: &StorageConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a store around an existing client.
    pub fn with_client(client: reqwest::Client, config: &StorageConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            field_name: config.field_name.clone(),
        }
    }

    async fn try_upload<F: MediaFile>(&self, file: &F) -> Result<String, StoreError> {
        let data = file.read_bytes().await?;
        let mime = resolve_mime(file.mime_type(), &data).to_owned();

        let part = Part::bytes(data.to_vec())
            .file_name(file.name().to_owned())
            .mime_str(&mime)?;
        let form = Form::new().part(self.field_name.clone(), part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: UploadResponse = serde_json::from_slice(&body)?;
        parsed
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or(StoreError::MissingUrl)
    }
}

impl MediaStore for HttpMediaStore {
    async fn upload<F: MediaFile>(&self, file: &F) -> UploadResult {
        match self.try_upload(file).await {
            Ok(url) => {
                tracing::debug!(file = file.name(), %url, "upload succeeded");
                UploadResult::Success(url)
            }
            Err(error) => {
                tracing::warn!(
                    file = file.name(),
                    endpoint = %self.endpoint,
                    %error,
                    "upload failed, falling back to inline data"
                );
                UploadResult::Failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_accessors() {
        let ok = UploadResult::Success("/u/1.png".into());
        assert!(ok.is_success());
        assert_eq!(ok.url(), Some("/u/1.png"));
        assert_eq!(UploadResult::Failure.url(), None);
    }

    #[test]
    fn response_url_is_optional() {
        let parsed: UploadResponse = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(parsed.url.is_none());
    }
}
