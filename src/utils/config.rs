//! Application configuration

use crate::downloader::filename::FilenamePolicy;
use crate::utils::error::{Result, VidsaverError};
use crate::utils::paths::get_downloads_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding the extraction service address
pub const API_URL_ENV: &str = "VIDSAVER_API_URL";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base address of the extraction service
    pub api_base_url: String,

    /// Directory the default save target writes into
    pub download_location: PathBuf,

    /// Which filename wins when the service names the file
    pub filename_policy: FilenamePolicy,

    /// Transport-level timeout per request; none by default
    pub request_timeout_secs: Option<u64>,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3001".to_string(),
            download_location: get_downloads_dir(),
            filename_policy: FilenamePolicy::ServerAuthoritative,
            request_timeout_secs: None,
            user_agent: concat!("vidsaver/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: AppSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `VIDSAVER_API_URL` if it is set and non-empty
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(VidsaverError::Config(format!(
                "api_base_url must be an http(s) address, got {:?}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(VidsaverError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Endpoint URL for a path such as `/api/download`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}
