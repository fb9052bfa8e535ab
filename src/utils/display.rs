//! Human-readable formatting for format listings

use crate::extractor::models::{AudioFormat, VideoFormat};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Format an optional byte count as megabytes, e.g. "89.0MB"
pub fn format_file_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(bytes) if bytes > 0 => format!("{:.1}MB", bytes as f64 / BYTES_PER_MB),
        _ => "Size unknown".to_string(),
    }
}

/// Estimated size of a muxed download (unknown parts count as zero)
pub fn estimated_size(video: Option<&VideoFormat>, audio: Option<&AudioFormat>) -> Option<u64> {
    let video_size = video.and_then(|f| f.filesize);
    let audio_size = audio.and_then(|f| f.filesize);

    match (video_size, audio_size) {
        (None, None) => None,
        (v, a) => Some(v.unwrap_or(0) + a.unwrap_or(0)),
    }
}
