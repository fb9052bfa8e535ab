//! Session state machine
//!
//! ```text
//! Idle ──submit──▶ FetchingMetadata ──ok──▶ Ready ──download──▶ Downloading
//!   ▲                    │                   ▲                    │  │
//!   │                    └──err──▶ Error ◀───┼────────fail────────┘  │
//!   │                                        └───────all done────────┘
//! ```
//!
//! Every submission bumps a generation counter. Completions carry the
//! generation they were started under and are ignored once it is stale.

use crate::extractor::metadata::FetchedMetadata;
use crate::extractor::models::{DownloadRequest, DownloadType, QualityOptions, VideoInfo};
use crate::utils::error::{Result, VidsaverError};

/// Current state of a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    FetchingMetadata {
        url: String,
    },
    Ready {
        info: VideoInfo,
        options: QualityOptions,
    },
    /// One or more downloads in flight; metadata stays displayed
    Downloading {
        info: VideoInfo,
        options: QualityOptions,
        active: Vec<DownloadType>,
    },
    Error(String),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::FetchingMetadata { .. } => "FetchingMetadata",
            SessionState::Ready { .. } => "Ready",
            SessionState::Downloading { .. } => "Downloading",
            SessionState::Error(_) => "Error",
        }
    }

    /// Metadata currently on display, if any
    pub fn metadata(&self) -> Option<(&VideoInfo, &QualityOptions)> {
        match self {
            SessionState::Ready { info, options }
            | SessionState::Downloading { info, options, .. } => Some((info, options)),
            _ => None,
        }
    }
}

/// A download the session has admitted
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDownload {
    pub generation: u64,
    pub request: DownloadRequest,
    /// Video title, used for client-derived filenames
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start fetching metadata for a new URL. Clears whatever was displayed.
    pub fn begin_fetch(&mut self, url: &str) -> Result<u64> {
        if let SessionState::FetchingMetadata { url: pending } = &self.state {
            return Err(VidsaverError::InvalidState(format!(
                "metadata for {} is still being fetched",
                pending
            )));
        }

        self.generation += 1;
        self.state = SessionState::FetchingMetadata {
            url: url.to_string(),
        };
        Ok(self.generation)
    }

    /// Returns false if the result was stale and ignored
    pub fn metadata_loaded(&mut self, generation: u64, metadata: FetchedMetadata) -> bool {
        if !self.is_current_fetch(generation) {
            return false;
        }
        self.state = SessionState::Ready {
            info: metadata.info,
            options: metadata.options,
        };
        true
    }

    /// Returns false if the failure was stale and ignored
    pub fn metadata_failed(&mut self, generation: u64, message: String) -> bool {
        if !self.is_current_fetch(generation) {
            return false;
        }
        self.state = SessionState::Error(message);
        true
    }

    /// Admit a download of `kind`.
    ///
    /// Absent selectors default to the first listed format. Selectors that
    /// are not in the quality options are rejected.
    pub fn begin_download(
        &mut self,
        kind: DownloadType,
        video_quality: Option<String>,
        audio_quality: Option<String>,
    ) -> Result<PlannedDownload> {
        let (info, options) = self.state.metadata().ok_or_else(|| {
            VidsaverError::InvalidState(format!(
                "cannot start a download while {}",
                self.state.name()
            ))
        })?;

        if let SessionState::Downloading { active, .. } = &self.state {
            if active.contains(&kind) {
                return Err(VidsaverError::InvalidState(format!(
                    "a {} download is already in progress",
                    kind
                )));
            }
        }

        let video_quality = match video_quality {
            Some(id) if options.find_video(&id).is_none() => {
                return Err(VidsaverError::InvalidSelection(format!(
                    "video format {} is not offered for this URL",
                    id
                )));
            }
            Some(id) => Some(id),
            None => options.default_video().map(|f| f.format_id.clone()),
        };
        let audio_quality = match audio_quality {
            Some(id) if options.find_audio(&id).is_none() => {
                return Err(VidsaverError::InvalidSelection(format!(
                    "audio format {} is not offered for this URL",
                    id
                )));
            }
            Some(id) => Some(id),
            None => options.default_audio().map(|f| f.format_id.clone()),
        };

        let planned = PlannedDownload {
            generation: self.generation,
            request: DownloadRequest {
                url: info.url.clone(),
                kind,
                video_quality,
                audio_quality,
            },
            title: info.title.clone(),
        };

        self.state = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Ready { info, options } => SessionState::Downloading {
                info,
                options,
                active: vec![kind],
            },
            SessionState::Downloading {
                info,
                options,
                mut active,
            } => {
                active.push(kind);
                SessionState::Downloading {
                    info,
                    options,
                    active,
                }
            }
            other => other,
        };

        Ok(planned)
    }

    /// Returns false if the completion was stale and ignored
    pub fn download_finished(&mut self, generation: u64, kind: DownloadType) -> bool {
        if !self.is_active_download(generation, kind) {
            return false;
        }

        self.state = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Downloading {
                info,
                options,
                mut active,
            } => {
                active.retain(|k| *k != kind);
                if active.is_empty() {
                    SessionState::Ready { info, options }
                } else {
                    SessionState::Downloading {
                        info,
                        options,
                        active,
                    }
                }
            }
            other => other,
        };
        true
    }

    /// A failed download abandons the session and clears displayed metadata
    pub fn download_failed(&mut self, generation: u64, kind: DownloadType, message: String) -> bool {
        if !self.is_active_download(generation, kind) {
            return false;
        }
        self.state = SessionState::Error(message);
        true
    }

    fn is_current_fetch(&self, generation: u64) -> bool {
        generation == self.generation
            && matches!(self.state, SessionState::FetchingMetadata { .. })
    }

    fn is_active_download(&self, generation: u64, kind: DownloadType) -> bool {
        generation == self.generation
            && matches!(&self.state, SessionState::Downloading { active, .. } if active.contains(&kind))
    }
}
