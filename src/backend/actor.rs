use super::messages::{BackendCommand, BackendEvent};
use super::state::{PlannedDownload, Session};
use crate::downloader::{CompletedDownload, DownloadOrchestrator};
use crate::extractor::metadata::fetch_metadata;
use crate::extractor::{DownloadType, VideoService};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Result of a spawned download, fed back into the actor loop
struct DownloadOutcome {
    generation: u64,
    kind: DownloadType,
    result: Result<CompletedDownload>,
}

/// Owns the session state machine and serialises commands against it.
///
/// Metadata fetches run inline, so commands sent meanwhile wait their turn.
/// Downloads are spawned and report back through an internal channel.
pub struct BackendActor {
    receiver: mpsc::Receiver<BackendCommand>,
    sender: mpsc::Sender<BackendEvent>,

    // Components
    service: Arc<dyn VideoService>,
    orchestrator: DownloadOrchestrator,
    session: Session,

    outcome_tx: mpsc::Sender<DownloadOutcome>,
    outcome_rx: mpsc::Receiver<DownloadOutcome>,
}

impl BackendActor {
    pub fn new(
        service: Arc<dyn VideoService>,
        orchestrator: DownloadOrchestrator,
        receiver: mpsc::Receiver<BackendCommand>,
        sender: mpsc::Sender<BackendEvent>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(16);

        Self {
            receiver,
            sender,
            service,
            orchestrator,
            session: Session::new(),
            outcome_tx,
            outcome_rx,
        }
    }

    pub async fn run(mut self) {
        info!("BackendActor started");

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => {
                    match cmd {
                        Some(BackendCommand::SubmitUrl { url }) => {
                            self.handle_submit_url(url).await;
                        }
                        Some(BackendCommand::Download {
                            kind,
                            video_quality,
                            audio_quality,
                        }) => {
                            self.handle_download(kind, video_quality, audio_quality)
                                .await;
                        }
                        Some(BackendCommand::Shutdown) | None => {
                            info!("BackendActor shutting down");
                            break;
                        }
                    }
                }
                Some(outcome) = self.outcome_rx.recv() => {
                    self.handle_outcome(outcome).await;
                }
            }
        }
    }

    async fn handle_submit_url(&mut self, url: String) {
        let generation = match self.session.begin_fetch(&url) {
            Ok(generation) => generation,
            Err(e) => {
                let _ = self.sender.send(BackendEvent::Error(e.message())).await;
                return;
            }
        };

        let _ = self
            .sender
            .send(BackendEvent::MetadataStarted { url: url.clone() })
            .await;

        match fetch_metadata(self.service.as_ref(), &url).await {
            Ok(metadata) => {
                let event = BackendEvent::MetadataReady {
                    info: metadata.info.clone(),
                    options: metadata.options.clone(),
                };
                if self.session.metadata_loaded(generation, metadata) {
                    let _ = self.sender.send(event).await;
                }
            }
            Err(e) => {
                let message = e.message();
                if self.session.metadata_failed(generation, message.clone()) {
                    let _ = self.sender.send(BackendEvent::MetadataFailed(message)).await;
                }
            }
        }
    }

    async fn handle_download(
        &mut self,
        kind: DownloadType,
        video_quality: Option<String>,
        audio_quality: Option<String>,
    ) {
        let planned = match self
            .session
            .begin_download(kind, video_quality, audio_quality)
        {
            Ok(planned) => planned,
            Err(e) => {
                let _ = self.sender.send(BackendEvent::Error(e.message())).await;
                return;
            }
        };

        let _ = self
            .sender
            .send(BackendEvent::DownloadStarted {
                kind,
                request: planned.request.clone(),
            })
            .await;

        self.spawn_download(planned);
    }

    fn spawn_download(&self, planned: PlannedDownload) {
        let orchestrator = self.orchestrator.clone();
        let outcome_tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = orchestrator
                .download(&planned.request, Some(&planned.title))
                .await;
            let outcome = DownloadOutcome {
                generation: planned.generation,
                kind: planned.request.kind,
                result,
            };
            if outcome_tx.send(outcome).await.is_err() {
                warn!("Backend stopped before a download finished");
            }
        });
    }

    async fn handle_outcome(&mut self, outcome: DownloadOutcome) {
        let DownloadOutcome {
            generation,
            kind,
            result,
        } = outcome;

        // The file is saved (or lost) either way; a stale outcome only skips
        // the state update.
        let event = match result {
            Ok(download) => {
                if !self.session.download_finished(generation, kind) {
                    debug!("Stale {} download completed", kind);
                }
                BackendEvent::DownloadCompleted { kind, download }
            }
            Err(e) => {
                let error = e.message();
                if !self.session.download_failed(generation, kind, error.clone()) {
                    debug!("Stale {} download failed: {}", kind, error);
                }
                BackendEvent::DownloadFailed { kind, error }
            }
        };

        let _ = self.sender.send(event).await;
    }
}
