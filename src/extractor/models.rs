//! Data structures exchanged with the extraction service

use crate::utils::display::format_file_size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Video information structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub url: String,
    pub title: String,
    pub thumbnail: String,
    /// Display string, e.g. "3:33"
    pub duration: String,
    /// Display string, e.g. "1.4B views"
    pub views: String,
    pub uploader: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A video encoding offered by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFormat {
    pub format_id: String,
    pub quality: String,
    pub ext: String,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl VideoFormat {
    /// Label for selection lists: "1080p - MP4 (1920x1080) - 89.0MB"
    pub fn label(&self) -> String {
        let dimensions = match (self.width, self.height) {
            (Some(width), Some(height)) => format!(" ({}x{})", width, height),
            _ => String::new(),
        };
        format!(
            "{} - {}{} - {}",
            self.quality,
            self.ext.to_uppercase(),
            dimensions,
            format_file_size(self.filesize)
        )
    }
}

/// An audio encoding offered by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFormat {
    pub format_id: String,
    pub ext: String,
    /// Average bitrate in kbps
    pub abr: u32,
    #[serde(default)]
    pub filesize: Option<u64>,
}

impl AudioFormat {
    /// Label for selection lists: "128kbps - M4A - 8.0MB"
    pub fn label(&self) -> String {
        format!(
            "{}kbps - {} - {}",
            self.abr,
            self.ext.to_uppercase(),
            format_file_size(self.filesize)
        )
    }
}

/// Video and audio encodings available for one URL, in the service's ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityOptions {
    pub video: Vec<VideoFormat>,
    pub audio: Vec<AudioFormat>,
}

impl QualityOptions {
    pub fn default_video(&self) -> Option<&VideoFormat> {
        self.video.first()
    }

    pub fn default_audio(&self) -> Option<&AudioFormat> {
        self.audio.first()
    }

    pub fn find_video(&self, format_id: &str) -> Option<&VideoFormat> {
        self.video.iter().find(|f| f.format_id == format_id)
    }

    pub fn find_audio(&self, format_id: &str) -> Option<&AudioFormat> {
        self.audio.iter().find(|f| f.format_id == format_id)
    }
}

/// What the backend should deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadType {
    /// Video and audio muxed into mp4
    Video,
    /// The selected audio track in its source container
    Audio,
    /// Audio transcoded to MP3
    Mp3,
}

impl DownloadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadType::Video => "video",
            DownloadType::Audio => "audio",
            DownloadType::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for DownloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "video" => Ok(DownloadType::Video),
            "audio" => Ok(DownloadType::Audio),
            "mp3" => Ok(DownloadType::Mp3),
            other => Err(format!("unknown download type: {}", other)),
        }
    }
}

/// Body of `POST /api/download`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: DownloadType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_quality: Option<String>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, kind: DownloadType) -> Self {
        Self {
            url: url.into(),
            kind,
            video_quality: None,
            audio_quality: None,
        }
    }

    pub fn with_video_quality(mut self, format_id: impl Into<String>) -> Self {
        self.video_quality = Some(format_id.into());
        self
    }

    pub fn with_audio_quality(mut self, format_id: impl Into<String>) -> Self {
        self.audio_quality = Some(format_id.into());
        self
    }
}

/// Body of the two metadata endpoints
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UrlRequest<'a> {
    pub url: &'a str,
}
