//! Utility modules for error handling, configuration and formatting

pub mod config;
pub mod display;
pub mod error;
pub mod paths;
pub mod url;

// Re-export for convenience
pub use config::AppSettings;
pub use display::{estimated_size, format_file_size};
pub use error::{Result, VidsaverError};
pub use paths::{get_config_dir, get_downloads_dir, get_settings_path};
pub use url::looks_like_video_url;
