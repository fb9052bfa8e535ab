pub mod api;
pub mod metadata;
pub mod models;
pub mod traits;

pub use api::ApiClient;
pub use metadata::{fetch_metadata, fetch_quality_options, fetch_video_info, FetchedMetadata};
pub use models::{AudioFormat, DownloadRequest, DownloadType, QualityOptions, VideoFormat, VideoInfo};
pub use traits::{DownloadPayload, VideoService};
