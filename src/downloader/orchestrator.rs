//! Download orchestration
//!
//! One call performs one download request, buffers the full payload, names
//! it, and hands it to the save target exactly once. Calls share no state,
//! so several may run at the same time.

use crate::downloader::filename::{resolve_filename, FilenamePolicy};
use crate::downloader::sink::SaveTarget;
use crate::extractor::models::DownloadRequest;
use crate::extractor::traits::VideoService;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a dispatched save
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDownload {
    /// Name of the file as saved, which may be shorter than the resolved name
    pub filename: String,
    pub size_bytes: usize,
    pub content_type: Option<String>,
    /// Where the save target put the file
    pub location: PathBuf,
}

/// Performs downloads against a service and saves them through a target
#[derive(Clone)]
pub struct DownloadOrchestrator {
    service: Arc<dyn VideoService>,
    sink: Arc<dyn SaveTarget>,
    policy: FilenamePolicy,
}

impl DownloadOrchestrator {
    pub fn new(
        service: Arc<dyn VideoService>,
        sink: Arc<dyn SaveTarget>,
        policy: FilenamePolicy,
    ) -> Self {
        Self {
            service,
            sink,
            policy,
        }
    }

    pub fn policy(&self) -> FilenamePolicy {
        self.policy
    }

    /// Download and save.
    ///
    /// `display_title` feeds the client-derived filename. A failed download
    /// call never reaches the save target.
    pub async fn download(
        &self,
        request: &DownloadRequest,
        display_title: Option<&str>,
    ) -> Result<CompletedDownload> {
        debug!("Starting {} download for {}", request.kind, request.url);

        let payload = self.service.download(request).await?;

        let filename = resolve_filename(
            self.policy,
            payload.content_disposition.as_deref(),
            display_title,
            request.kind,
            request.audio_quality.as_deref(),
        );
        let size_bytes = payload.bytes.len();

        let location = self.sink.save(payload.bytes, &filename).await?;
        let filename = location
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(filename);
        info!("{} download saved as {}", request.kind, filename);

        Ok(CompletedDownload {
            filename,
            size_bytes,
            content_type: payload.content_type,
            location,
        })
    }
}
