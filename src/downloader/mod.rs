//! Download orchestration, filename resolution and save targets

pub mod filename;
pub mod orchestrator;
pub mod sink;

// Re-export for convenience
pub use filename::{resolve_filename, FilenamePolicy};
pub use orchestrator::{CompletedDownload, DownloadOrchestrator};
pub use sink::{DirectorySink, SaveTarget};
