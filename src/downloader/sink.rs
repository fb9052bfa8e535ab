//! Save targets: where a finished payload ends up

use crate::utils::error::{Result, VidsaverError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// "Save bytes as file" primitive
#[async_trait]
pub trait SaveTarget: Send + Sync {
    /// Persist `bytes` under `filename`, returning where the file landed
    async fn save(&self, bytes: Vec<u8>, filename: &str) -> Result<PathBuf>;
}

/// Writes payloads into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for a filename. Only the final component is used, so a
    /// service-supplied name cannot point outside the directory.
    pub fn target_path(&self, filename: &str) -> Result<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| VidsaverError::Save(format!("unusable filename: {:?}", filename)))?;
        Ok(self.dir.join(name))
    }
}

#[async_trait]
impl SaveTarget for DirectorySink {
    async fn save(&self, bytes: Vec<u8>, filename: &str) -> Result<PathBuf> {
        let path = self.target_path(filename)?;

        fs::create_dir_all(&self.dir).await.map_err(|e| {
            VidsaverError::Save(format!("failed to create {:?}: {}", self.dir, e))
        })?;
        fs::write(&path, &bytes)
            .await
            .map_err(|e| VidsaverError::Save(format!("failed to write {:?}: {}", path, e)))?;

        info!("Saved {} bytes to {:?}", bytes.len(), path);
        Ok(path)
    }
}
