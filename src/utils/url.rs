//! Best-effort URL pre-check
//!
//! This only decides whether to warn the user before a request is sent.
//! The extraction service remains the authority on what it accepts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YOUTUBE_URL_RE: Regex = Regex::new(
        r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|embed/|v/)|youtu\.be/)[\w-]+"
    )
    .unwrap();
}

/// Returns true when the URL looks like a video link the service understands
pub fn looks_like_video_url(url: &str) -> bool {
    YOUTUBE_URL_RE.is_match(url.trim())
}
