//! Image hosting
//!
//! Menu photos are not stored locally. The server checks the file, then
//! forwards it as an unsigned multipart upload (`file`, `upload_preset`) to
//! the configured host and hands back the host's `secure_url`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::core::ImageHostConfig;
use crate::utils::{AppError, ErrorCode};

/// Supported image formats
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// A checked file ready to forward
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Image uploads are not configured")]
    NotConfigured,

    #[error("Image host request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Image host rejected the upload ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Image host response has no secure_url")]
    MissingUrl,
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotConfigured => {
                AppError::with_message(ErrorCode::ConfigError, err.to_string())
            }
            other => AppError::with_message(ErrorCode::ImageHostFailed, other.to_string()),
        }
    }
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload and return the public URL
    async fn upload(&self, image: ImageUpload) -> Result<String, UploadError>;
}

/// Unsigned upload endpoint (Cloudinary style)
pub struct UnsignedUploadHost {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct HostResponse {
    secure_url: Option<String>,
}

impl UnsignedUploadHost {
    pub fn new(
        upload_url: impl Into<String>,
        upload_preset: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            upload_url: upload_url.into(),
            upload_preset: upload_preset.into(),
        })
    }
}

#[async_trait]
impl ImageHost for UnsignedUploadHost {
    async fn upload(&self, image: ImageUpload) -> Result<String, UploadError> {
        let size = image.bytes.len();
        let part = reqwest::multipart::Part::bytes(image.bytes)
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let resp = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(UploadError::Rejected { status, body });
        }

        let body: HostResponse = resp.json().await?;
        let url = body.secure_url.ok_or(UploadError::MissingUrl)?;
        tracing::info!(file = %image.file_name, size, url = %url, "Image uploaded to host");
        Ok(url)
    }
}

/// Used when no upload URL is configured
pub struct DisabledImageHost;

#[async_trait]
impl ImageHost for DisabledImageHost {
    async fn upload(&self, _image: ImageUpload) -> Result<String, UploadError> {
        Err(UploadError::NotConfigured)
    }
}

/// Pick the host implementation from configuration
pub fn from_config(config: &ImageHostConfig, timeout: Duration) -> Arc<dyn ImageHost> {
    match (&config.upload_url, &config.upload_preset) {
        (Some(url), Some(preset)) => match UnsignedUploadHost::new(url, preset, timeout) {
            Ok(host) => Arc::new(host),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build image host client, uploads disabled");
                Arc::new(DisabledImageHost)
            }
        },
        _ => {
            tracing::warn!("IMAGE_HOST_UPLOAD_URL / IMAGE_HOST_UPLOAD_PRESET not set, uploads disabled");
            Arc::new(DisabledImageHost)
        }
    }
}

/// Check a file before forwarding it
///
/// Rejects empty files, files over `max_bytes`, unsupported extensions and
/// bytes that do not decode as an image. Returns the content type to send.
pub fn validate_image(file_name: &str, data: &[u8], max_bytes: usize) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    if data.len() > max_bytes {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {} bytes ({}MB)",
                max_bytes,
                max_bytes / 1024 / 1024
            ),
        ));
    }

    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::with_message(
            ErrorCode::InvalidImageFile,
            format!("Invalid image file ({}): {}", ext, e),
        ));
    }

    Ok(mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string())
}
