//! HTTP client for the extraction service
//!
//! Talks to the three JSON endpoints:
//! - `POST /api/video-info` with `{ "url": ... }`
//! - `POST /api/quality-options` with `{ "url": ... }`
//! - `POST /api/download` with a [`DownloadRequest`], answered with raw bytes

use crate::extractor::models::{DownloadRequest, QualityOptions, UrlRequest, VideoInfo};
use crate::extractor::traits::{DownloadPayload, VideoService};
use crate::utils::config::AppSettings;
use crate::utils::error::{Result, VidsaverError};
use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

pub const VIDEO_INFO_PATH: &str = "/api/video-info";
pub const QUALITY_OPTIONS_PATH: &str = "/api/quality-options";
pub const DOWNLOAD_PATH: &str = "/api/download";

/// reqwest-backed [`VideoService`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    settings: AppSettings,
}

impl ApiClient {
    /// Build a client from settings. Applies the optional transport timeout.
    pub fn new(settings: AppSettings) -> Result<Self> {
        settings.validate()?;

        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| VidsaverError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn base_url(&self) -> &str {
        &self.settings.api_base_url
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<Response, reqwest::Error> {
        let endpoint = self.settings.endpoint(path);
        debug!("POST {}", endpoint);
        self.client.post(endpoint).json(body).send().await
    }

    /// POST `{ url }` and decode a JSON success body
    async fn fetch_metadata_json<T: DeserializeOwned>(
        &self,
        path: &str,
        url: &str,
        generic_error: &str,
    ) -> Result<T> {
        let response = self
            .post(path, &UrlRequest { url })
            .await
            .map_err(|e| VidsaverError::MetadataFetch(format!("{}: {}", generic_error, e)))?;

        if !response.status().is_success() {
            let message = error_message(response, generic_error).await;
            error!("{} failed: {}", path, message);
            return Err(VidsaverError::MetadataFetch(message));
        }

        response.json::<T>().await.map_err(|e| {
            VidsaverError::MetadataFetch(format!("{}: invalid response body: {}", generic_error, e))
        })
    }
}

/// Server-supplied error text, or a generic message naming the status
async fn error_message(response: Response, generic: &str) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => format!("{} (HTTP {})", generic, status.as_u16()),
    }
}

/// Header value as text. Servers put raw UTF-8 in `filename=`, which
/// `HeaderValue::to_str` rejects, so the bytes are decoded directly.
fn header_string(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

#[async_trait]
impl VideoService for ApiClient {
    async fn video_info(&self, url: &str) -> Result<VideoInfo> {
        self.fetch_metadata_json(VIDEO_INFO_PATH, url, "Failed to fetch video information")
            .await
    }

    async fn quality_options(&self, url: &str) -> Result<QualityOptions> {
        self.fetch_metadata_json(QUALITY_OPTIONS_PATH, url, "Failed to fetch quality options")
            .await
    }

    async fn download(&self, request: &DownloadRequest) -> Result<DownloadPayload> {
        let response = self
            .post(DOWNLOAD_PATH, request)
            .await
            .map_err(|e| VidsaverError::Download(e.to_string()))?;

        if !response.status().is_success() {
            let message = error_message(response, "Download failed").await;
            error!("{} failed: {}", DOWNLOAD_PATH, message);
            return Err(VidsaverError::Download(message));
        }

        let content_type = header_string(&response, CONTENT_TYPE);
        let content_disposition = header_string(&response, CONTENT_DISPOSITION);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VidsaverError::Download(format!("failed to read response body: {}", e)))?;

        debug!(
            "Downloaded {} bytes ({:?}) for {}",
            bytes.len(),
            content_type,
            request.url
        );

        Ok(DownloadPayload {
            bytes: bytes.to_vec(),
            content_type,
            content_disposition,
        })
    }
}
