//! Shared fakes for integration tests: an in-memory extraction service and a
//! save target that records every call.
#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;
use vidsaver::extractor::{DownloadPayload, VideoService};
use vidsaver::{
    AudioFormat, DownloadRequest, DownloadType, QualityOptions, SaveTarget, VideoFormat,
    VideoInfo, VidsaverError,
};

pub const SAMPLE_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

pub fn sample_info() -> VideoInfo {
    VideoInfo {
        url: SAMPLE_URL.to_string(),
        title: "Test: Video / Clip?".to_string(),
        thumbnail: "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg".to_string(),
        duration: "3:33".to_string(),
        views: "1.4B views".to_string(),
        uploader: "Rick Astley".to_string(),
        description: None,
    }
}

pub fn sample_options() -> QualityOptions {
    QualityOptions {
        video: vec![
            VideoFormat {
                format_id: "137".to_string(),
                quality: "1080p".to_string(),
                ext: "mp4".to_string(),
                filesize: Some(89 * 1024 * 1024),
                width: Some(1920),
                height: Some(1080),
            },
            VideoFormat {
                format_id: "136".to_string(),
                quality: "720p".to_string(),
                ext: "mp4".to_string(),
                filesize: Some(45 * 1024 * 1024),
                width: Some(1280),
                height: Some(720),
            },
        ],
        audio: vec![
            AudioFormat {
                format_id: "140".to_string(),
                ext: "m4a".to_string(),
                abr: 128,
                filesize: Some(8 * 1024 * 1024),
            },
            AudioFormat {
                format_id: "251".to_string(),
                ext: "webm".to_string(),
                abr: 160,
                filesize: Some(9 * 1024 * 1024),
            },
        ],
    }
}

/// Bytes the mock service returns for a download type
pub fn payload_for(kind: DownloadType) -> Vec<u8> {
    format!("payload-{}", kind).repeat(64).into_bytes()
}

/// Configurable in-memory extraction service
#[derive(Default)]
pub struct MockService {
    pub info_error: Option<String>,
    pub options_error: Option<String>,
    /// Never answer the quality-options call
    pub options_hang: bool,
    /// Both metadata legs wait here before answering
    pub metadata_barrier: Option<Arc<Barrier>>,
    pub download_error: Option<String>,
    pub content_disposition: Option<String>,
    /// Extra latency for video downloads, to force overlap
    pub video_delay: Option<Duration>,
    pub download_requests: Mutex<Vec<DownloadRequest>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded_requests(&self) -> Vec<DownloadRequest> {
        self.download_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoService for MockService {
    async fn video_info(&self, _url: &str) -> vidsaver::Result<VideoInfo> {
        if let Some(error) = &self.info_error {
            return Err(VidsaverError::MetadataFetch(error.clone()));
        }
        if let Some(barrier) = &self.metadata_barrier {
            barrier.wait().await;
        }
        Ok(sample_info())
    }

    async fn quality_options(&self, _url: &str) -> vidsaver::Result<QualityOptions> {
        if self.options_hang {
            std::future::pending::<()>().await;
        }
        if let Some(barrier) = &self.metadata_barrier {
            barrier.wait().await;
        }
        if let Some(error) = &self.options_error {
            return Err(VidsaverError::MetadataFetch(error.clone()));
        }
        Ok(sample_options())
    }

    async fn download(&self, request: &DownloadRequest) -> vidsaver::Result<DownloadPayload> {
        self.download_requests.lock().unwrap().push(request.clone());

        if request.kind == DownloadType::Video {
            if let Some(delay) = self.video_delay {
                tokio::time::sleep(delay).await;
            }
        }
        if let Some(error) = &self.download_error {
            return Err(VidsaverError::Download(error.clone()));
        }

        Ok(DownloadPayload {
            bytes: payload_for(request.kind),
            content_type: Some("application/octet-stream".to_string()),
            content_disposition: self.content_disposition.clone(),
        })
    }
}

/// Save target that keeps every saved file in memory
#[derive(Default)]
pub struct RecordingSink {
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveTarget for RecordingSink {
    async fn save(&self, bytes: Vec<u8>, filename: &str) -> vidsaver::Result<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes));
        Ok(PathBuf::from(filename))
    }
}
