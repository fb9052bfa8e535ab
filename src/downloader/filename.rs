//! Filename resolution for completed downloads
//!
//! A file is named either by the service (the `filename` parameter of a
//! Content-Disposition header) or on the client, from the video title and the
//! download type. [`FilenamePolicy`] decides which applies.

use crate::extractor::models::DownloadType;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Base name used when no usable title exists
pub const DEFAULT_BASE_NAME: &str = "download";

/// Maximum length of a client-derived base name, in characters
pub const MAX_BASE_LEN: usize = 100;

const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Audio format ids with a known container
const AUDIO_EXTENSIONS: [(&str, &str); 5] = [
    ("139", "m4a"),  // 48kbps AAC
    ("140", "m4a"),  // 128kbps AAC
    ("249", "webm"), // 50kbps Opus
    ("250", "webm"), // 70kbps Opus
    ("251", "webm"), // 160kbps Opus
];

const DEFAULT_AUDIO_EXTENSION: &str = "m4a";

lazy_static! {
    static ref DISPOSITION_FILENAME_RE: Regex = Regex::new(r#"filename="?([^"]+)"?"#).unwrap();
    static ref WHITESPACE_RUN_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref UNDERSCORE_RUN_RE: Regex = Regex::new(r"_{2,}").unwrap();
}

/// Filename precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenamePolicy {
    /// Use the service's filename when it sends one, else derive it
    #[default]
    ServerAuthoritative,
    /// Always derive the filename from title and type
    ClientDerived,
}

/// Sanitize a title into a filename base.
///
/// Forbidden characters and whitespace runs become `_`, underscore runs are
/// collapsed, and the result is trimmed of `_` and cut to [`MAX_BASE_LEN`]
/// characters. May return an empty string.
pub fn sanitize_title(title: &str) -> String {
    // Step 1: Replace characters invalid on common filesystems
    let replaced: String = title
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect();

    // Step 2: Whitespace runs become a single underscore
    let replaced = WHITESPACE_RUN_RE.replace_all(&replaced, "_");

    // Step 3: Collapse underscore runs
    let collapsed = UNDERSCORE_RUN_RE.replace_all(&replaced, "_");

    // Step 4: Trim and limit length
    let truncated: String = collapsed
        .trim_matches('_')
        .chars()
        .take(MAX_BASE_LEN)
        .collect();

    // Truncation can expose an underscore at the cut
    truncated.trim_end_matches('_').to_string()
}

/// File extension (without dot) for a download type
pub fn resolve_extension(kind: DownloadType, audio_quality: Option<&str>) -> &'static str {
    match kind {
        DownloadType::Mp3 => "mp3",
        // The service always muxes video downloads into mp4
        DownloadType::Video => "mp4",
        DownloadType::Audio => audio_quality
            .and_then(|id| {
                AUDIO_EXTENSIONS
                    .iter()
                    .find(|(format_id, _)| *format_id == id)
                    .map(|(_, ext)| *ext)
            })
            .unwrap_or(DEFAULT_AUDIO_EXTENSION),
    }
}

/// Client-derived filename: sanitized title plus type extension
pub fn fallback_filename(
    title: Option<&str>,
    kind: DownloadType,
    audio_quality: Option<&str>,
) -> String {
    let base = sanitize_title(title.unwrap_or(DEFAULT_BASE_NAME));
    let base = if base.is_empty() {
        DEFAULT_BASE_NAME
    } else {
        base.as_str()
    };

    format!("{}.{}", base, resolve_extension(kind, audio_quality))
}

/// Extract the `filename` parameter from a Content-Disposition header value.
///
/// ```
/// use vidsaver::downloader::filename::filename_from_content_disposition;
/// assert_eq!(
///     filename_from_content_disposition(r#"attachment; filename="My Video.mp3""#),
///     Some("My Video.mp3".to_string())
/// );
/// assert_eq!(filename_from_content_disposition("inline"), None);
/// ```
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    DISPOSITION_FILENAME_RE
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolve the final filename for a download
pub fn resolve_filename(
    policy: FilenamePolicy,
    content_disposition: Option<&str>,
    title: Option<&str>,
    kind: DownloadType,
    audio_quality: Option<&str>,
) -> String {
    if policy == FilenamePolicy::ServerAuthoritative {
        if let Some(name) = content_disposition.and_then(filename_from_content_disposition) {
            return name;
        }
    }

    fallback_filename(title, kind, audio_quality)
}
