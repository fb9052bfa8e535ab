//! Platform path resolution
//!
//! Paths are always resolved through platform conventions, never relative to
//! the current working directory:
//! - Settings: `<config dir>/vidsaver/settings.json`
//! - Downloads: the user's Downloads directory

use std::path::PathBuf;
use tracing::{debug, warn};

/// Get the configuration directory for VidSaver.
///
/// Returns `<config dir>/vidsaver/` (e.g. `~/.config/vidsaver` on Linux).
/// The directory is not created; settings are only read from it.
pub fn get_config_dir() -> PathBuf {
    let dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| {
            warn!("Could not determine config directory, using /tmp");
            PathBuf::from("/tmp")
        })
        .join("vidsaver");

    debug!("Config directory: {:?}", dir);
    dir
}

/// Default location of the settings file
pub fn get_settings_path() -> PathBuf {
    get_config_dir().join("settings.json")
}

/// Get the downloads directory.
///
/// Falls back to `~/Downloads` if the platform lookup fails.
pub fn get_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using /tmp");
            PathBuf::from("/tmp")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_absolute() {
        assert!(get_config_dir().is_absolute());
        assert!(get_downloads_dir().is_absolute());
    }

    #[test]
    fn test_settings_file_lives_in_config_dir() {
        let path = get_settings_path();
        assert_eq!(path.file_name().unwrap(), "settings.json");
        assert!(path.parent().unwrap().ends_with("vidsaver"));
    }
}
