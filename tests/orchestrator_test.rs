//! Download orchestration against an in-memory service and save target.

mod common;

use common::{payload_for, MockService, RecordingSink, SAMPLE_URL};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};
use vidsaver::{
    DirectorySink, DownloadOrchestrator, DownloadRequest, DownloadType, FilenamePolicy,
    VidsaverError,
};

fn orchestrator(
    service: MockService,
    policy: FilenamePolicy,
) -> (DownloadOrchestrator, Arc<MockService>, Arc<RecordingSink>) {
    let service = Arc::new(service);
    let sink = Arc::new(RecordingSink::new());
    let orchestrator = DownloadOrchestrator::new(service.clone(), sink.clone(), policy);
    (orchestrator, service, sink)
}

#[tokio::test]
async fn server_filename_is_used_verbatim() {
    let service = MockService {
        content_disposition: Some(r#"attachment; filename="My Video.mp3""#.to_string()),
        ..Default::default()
    };
    let (orchestrator, _, sink) = orchestrator(service, FilenamePolicy::ServerAuthoritative);

    let request = DownloadRequest::new(SAMPLE_URL, DownloadType::Video);
    let completed = assert_ok!(orchestrator.download(&request, Some("Ignored title")).await);

    assert_eq!(completed.filename, "My Video.mp3");
    assert_eq!(sink.saved().len(), 1);
    assert_eq!(sink.saved()[0].0, "My Video.mp3");
}

#[tokio::test]
async fn fallback_filename_from_title_and_type() {
    let (orchestrator, _, sink) =
        orchestrator(MockService::new(), FilenamePolicy::ServerAuthoritative);

    let request = DownloadRequest::new(SAMPLE_URL, DownloadType::Mp3);
    let completed = assert_ok!(orchestrator.download(&request, Some("Test: Video / Clip?")).await);
    assert_eq!(completed.filename, "Test_Video_Clip.mp3");

    let request = DownloadRequest::new(SAMPLE_URL, DownloadType::Video);
    let completed = assert_ok!(orchestrator.download(&request, Some("")).await);
    assert_eq!(completed.filename, "download.mp4");

    let request = DownloadRequest::new(SAMPLE_URL, DownloadType::Audio).with_audio_quality("251");
    let completed = assert_ok!(orchestrator.download(&request, None).await);
    assert_eq!(completed.filename, "download.webm");

    assert_eq!(sink.saved().len(), 3);
}

#[tokio::test]
async fn client_policy_ignores_server_filename() {
    let service = MockService {
        content_disposition: Some(r#"attachment; filename="download""#.to_string()),
        ..Default::default()
    };
    let (orchestrator, _, _) = orchestrator(service, FilenamePolicy::ClientDerived);

    let request = DownloadRequest::new(SAMPLE_URL, DownloadType::Audio).with_audio_quality("140");
    let completed = assert_ok!(orchestrator.download(&request, Some("Never Gonna")).await);
    assert_eq!(completed.filename, "Never_Gonna.m4a");
}

#[tokio::test]
async fn request_is_forwarded_unchanged() {
    let (orchestrator, service, sink) =
        orchestrator(MockService::new(), FilenamePolicy::ServerAuthoritative);

    let request = DownloadRequest::new(SAMPLE_URL, DownloadType::Video)
        .with_video_quality("136")
        .with_audio_quality("251");
    let completed = assert_ok!(orchestrator.download(&request, Some("t")).await);

    assert_eq!(service.recorded_requests(), vec![request]);
    assert_eq!(completed.size_bytes, payload_for(DownloadType::Video).len());
    assert_eq!(completed.content_type.as_deref(), Some("application/octet-stream"));
    assert_eq!(sink.saved()[0].1, payload_for(DownloadType::Video));
}

#[tokio::test]
async fn failed_download_never_saves() {
    let service = MockService {
        download_error: Some("yt-dlp is not available on this system".to_string()),
        ..Default::default()
    };
    let (orchestrator, service, sink) = orchestrator(service, FilenamePolicy::ServerAuthoritative);

    let request = DownloadRequest::new(SAMPLE_URL, DownloadType::Mp3);
    let err = assert_err!(orchestrator.download(&request, Some("t")).await);

    assert!(matches!(err, VidsaverError::Download(ref msg) if msg.contains("yt-dlp")));
    assert_eq!(service.recorded_requests().len(), 1, "no retry");
    assert!(sink.saved().is_empty());
}

#[tokio::test]
async fn concurrent_downloads_save_their_own_payloads() {
    let service = MockService {
        video_delay: Some(Duration::from_millis(50)),
        ..Default::default()
    };
    let (orchestrator, _, sink) = orchestrator(service, FilenamePolicy::ServerAuthoritative);

    let video = DownloadRequest::new(SAMPLE_URL, DownloadType::Video);
    let mp3 = DownloadRequest::new(SAMPLE_URL, DownloadType::Mp3);

    let (video_result, mp3_result) = tokio::join!(
        orchestrator.download(&video, Some("Same Title")),
        orchestrator.download(&mp3, Some("Same Title")),
    );
    assert_eq!(assert_ok!(video_result).filename, "Same_Title.mp4");
    assert_eq!(assert_ok!(mp3_result).filename, "Same_Title.mp3");

    let saved = sink.saved();
    assert_eq!(saved.len(), 2);
    // The delayed video download finishes last
    assert_eq!(saved[0], ("Same_Title.mp3".to_string(), payload_for(DownloadType::Mp3)));
    assert_eq!(saved[1], ("Same_Title.mp4".to_string(), payload_for(DownloadType::Video)));
}

#[tokio::test]
async fn reported_filename_matches_saved_file() {
    let temp = TempDir::new().expect("temp dir");
    let service = Arc::new(MockService {
        content_disposition: Some(r#"attachment; filename="a/b.mp3""#.to_string()),
        ..Default::default()
    });
    let sink = Arc::new(DirectorySink::new(temp.path()));
    let orchestrator =
        DownloadOrchestrator::new(service, sink, FilenamePolicy::ServerAuthoritative);

    let request = DownloadRequest::new(SAMPLE_URL, DownloadType::Mp3);
    let completed = assert_ok!(orchestrator.download(&request, Some("t")).await);

    assert_eq!(completed.filename, "b.mp3");
    assert_eq!(completed.location, temp.path().join("b.mp3"));
    assert_eq!(
        tokio::fs::read(&completed.location).await.unwrap(),
        payload_for(DownloadType::Mp3)
    );
}
