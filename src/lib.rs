//! VidSaver client library
//!
//! Fetches video metadata and quality options from an extraction service,
//! requests downloads, names the resulting files and saves them.

pub mod backend;
pub mod downloader;
pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use backend::{BackendActor, BackendCommand, BackendEvent, Session, SessionState};
pub use downloader::{CompletedDownload, DirectorySink, DownloadOrchestrator, FilenamePolicy, SaveTarget};
pub use extractor::{
    ApiClient, AudioFormat, DownloadRequest, DownloadType, QualityOptions, VideoFormat, VideoInfo,
    VideoService,
};
pub use utils::{AppSettings, Result, VidsaverError};
