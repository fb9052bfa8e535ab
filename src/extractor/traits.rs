use crate::extractor::models::{DownloadRequest, QualityOptions, VideoInfo};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A fully buffered download response
#[derive(Debug, Clone, Default)]
pub struct DownloadPayload {
    pub bytes: Vec<u8>,
    /// `Content-Type` of the response, if sent
    pub content_type: Option<String>,
    /// Raw `Content-Disposition` header value, if sent
    pub content_disposition: Option<String>,
}

/// The remote extraction service
///
/// This trait isolates the core from the transport used to reach the
/// service. [`crate::extractor::ApiClient`] is the HTTP implementation.
#[async_trait]
pub trait VideoService: Send + Sync {
    /// Fetches video metadata. Fails with `MetadataFetch`.
    async fn video_info(&self, url: &str) -> Result<VideoInfo>;

    /// Fetches the encodings available for a URL. Fails with `MetadataFetch`.
    async fn quality_options(&self, url: &str) -> Result<QualityOptions>;

    /// Performs the download call and buffers the whole body. Fails with `Download`.
    async fn download(&self, request: &DownloadRequest) -> Result<DownloadPayload>;
}
