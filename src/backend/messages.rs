use crate::downloader::CompletedDownload;
use crate::extractor::{DownloadRequest, DownloadType, QualityOptions, VideoInfo};

/// Commands sent from the front end to the backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    SubmitUrl {
        url: String,
    },
    Download {
        kind: DownloadType,
        video_quality: Option<String>,
        audio_quality: Option<String>,
    },
    // System
    Shutdown,
}

/// Events sent from the backend to the front end
#[derive(Debug, Clone)]
pub enum BackendEvent {
    // Metadata
    MetadataStarted {
        url: String,
    },
    MetadataReady {
        info: VideoInfo,
        options: QualityOptions,
    },
    MetadataFailed(String),

    // Download life-cycle
    DownloadStarted {
        kind: DownloadType,
        request: DownloadRequest,
    },
    DownloadCompleted {
        kind: DownloadType,
        download: CompletedDownload,
    },
    DownloadFailed {
        kind: DownloadType,
        error: String,
    },

    /// A command was rejected in the current state
    Error(String),
}
