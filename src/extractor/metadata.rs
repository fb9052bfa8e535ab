//! Metadata fetching: video info and quality options for one URL

use crate::extractor::models::{QualityOptions, VideoInfo};
use crate::extractor::traits::VideoService;
use crate::utils::error::Result;
use futures::future::try_join;
use tracing::debug;

/// Video info and quality options fetched together for one URL
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedMetadata {
    pub info: VideoInfo,
    pub options: QualityOptions,
}

/// Fetch video info. Single attempt.
pub async fn fetch_video_info<S>(service: &S, url: &str) -> Result<VideoInfo>
where
    S: VideoService + ?Sized,
{
    service.video_info(url).await
}

/// Fetch quality options. Single attempt.
pub async fn fetch_quality_options<S>(service: &S, url: &str) -> Result<QualityOptions>
where
    S: VideoService + ?Sized,
{
    service.quality_options(url).await
}

/// Fetch both concurrently; the first failure aborts the join and the other
/// leg's result is dropped.
pub async fn fetch_metadata<S>(service: &S, url: &str) -> Result<FetchedMetadata>
where
    S: VideoService + ?Sized,
{
    debug!("Fetching metadata for {}", url);

    let (info, options) = try_join(
        fetch_video_info(service, url),
        fetch_quality_options(service, url),
    )
    .await?;

    debug!(
        "Metadata for {}: {} video / {} audio formats",
        url,
        options.video.len(),
        options.audio.len()
    );

    Ok(FetchedMetadata { info, options })
}
