//! Media upload module.
//!
//! Images picked on the device are pushed to the hosting service through its
//! unsigned upload endpoint and come back as a hosted URL, which is what gets
//! stored on product and profile records.

#[cfg(test)]
mod tests;

use crate::core::parse_error_response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

/// Errors that can occur during media uploads.
#[derive(Error, Debug)]
pub enum MediaError {
    /// Wrapper for `reqwest::Error`.
    #[error("HTTP Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    /// Errors returned by the media service.
    #[error("{0}")]
    ApiError(String),
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Client for the image hosting service.
pub struct MediaClient {
    client: reqwest::Client,
    base_url: String,
    upload_preset: String,
}

impl MediaClient {
    pub fn new(base_url: String, upload_preset: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            upload_preset,
        }
    }

    /// Uploads image data and returns its hosted URL.
    ///
    /// One attempt; a failure is surfaced to the caller, who decides whether
    /// the surrounding operation can proceed without the image.
    pub async fn upload_image(&self, data: Bytes, mime_type: &str) -> Result<String, MediaError> {
        let url = format!("{}/image/upload", self.base_url);
        let payload = format!("data:{};base64,{}", mime_type, STANDARD.encode(&data));

        let form = reqwest::multipart::Form::new()
            .text("file", payload)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let message = parse_error_response(response, "Upload failed").await;
            error!(%message, "image upload failed");
            return Err(MediaError::ApiError(message));
        }

        let uploaded: UploadResponse = response.json().await?;
        debug!(url = %uploaded.secure_url, "image uploaded");
        Ok(uploaded.secure_url)
    }
}
