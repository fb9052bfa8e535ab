//! VidSaver - command-line front end
//!
//! Inspects the formats the extraction service offers for a video URL and
//! downloads a muxed video, the raw audio track, or an MP3.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;
use vidsaver::backend::{BackendActor, BackendCommand, BackendEvent};
use vidsaver::downloader::{DirectorySink, DownloadOrchestrator, FilenamePolicy};
use vidsaver::extractor::{fetch_metadata, ApiClient, DownloadType, FetchedMetadata};
use vidsaver::utils::{self, AppSettings};

#[derive(Parser)]
#[command(name = "vidsaver", version, about = "Download videos, audio and MP3s through a VidSaver service")]
struct Args {
    /// Extraction service address (overrides settings and VIDSAVER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Settings file to load instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Always name files from the video title, ignoring the service's filename
    #[arg(long, global = true)]
    client_filenames: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show video details and the available formats
    Info {
        url: String,

        /// Print the raw metadata as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download a video, its audio track, or an MP3
    Download {
        url: String,

        /// video, audio or mp3
        #[arg(long = "type", default_value = "video")]
        kind: DownloadType,

        /// Video format id (defaults to the first offered)
        #[arg(long)]
        video_quality: Option<String>,

        /// Audio format id (defaults to the first offered)
        #[arg(long)]
        audio_quality: Option<String>,

        /// Directory to save into (defaults to the configured download location)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = load_settings(&args)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        match args.command {
            Commands::Info { url, json } => run_info(settings, url, json).await,
            Commands::Download {
                url,
                kind,
                video_quality,
                audio_quality,
                output_dir,
            } => {
                let output_dir = output_dir.unwrap_or_else(|| settings.download_location.clone());
                run_download(settings, url, kind, video_quality, audio_quality, output_dir).await
            }
        }
    })
}

fn load_settings(args: &Args) -> Result<AppSettings> {
    let path = args.config.clone().unwrap_or_else(utils::get_settings_path);
    let mut settings = AppSettings::load(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;

    settings.apply_env_overrides();
    if let Some(url) = &args.api_url {
        settings.api_base_url = url.clone();
    }
    if args.client_filenames {
        settings.filename_policy = FilenamePolicy::ClientDerived;
    }
    settings.validate()?;

    Ok(settings)
}

fn precheck_url(url: &str) {
    if !utils::looks_like_video_url(url) {
        warn!("{} does not look like a supported video URL; sending it anyway", url);
    }
}

async fn run_info(settings: AppSettings, url: String, json: bool) -> Result<()> {
    precheck_url(&url);

    let client = ApiClient::new(settings)?;
    let FetchedMetadata { info, options } = fetch_metadata(&client, &url).await?;

    if json {
        let value = serde_json::json!({ "info": info, "options": options });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Title:    {}", info.title);
    println!("Uploader: {}", info.uploader);
    println!("Duration: {}", info.duration);
    println!("Views:    {}", info.views);

    println!();
    println!("Video formats: {} options available", options.video.len());
    for format in &options.video {
        println!("  [{}] {}", format.format_id, format.label());
    }

    println!("Audio formats: {} options available", options.audio.len());
    for format in &options.audio {
        println!("  [{}] {}", format.format_id, format.label());
    }

    let muxed = utils::estimated_size(options.default_video(), options.default_audio());
    println!();
    println!(
        "Default video+audio download: est. {}",
        utils::format_file_size(muxed)
    );

    Ok(())
}

async fn run_download(
    settings: AppSettings,
    url: String,
    kind: DownloadType,
    video_quality: Option<String>,
    audio_quality: Option<String>,
    output_dir: PathBuf,
) -> Result<()> {
    precheck_url(&url);

    let policy = settings.filename_policy;
    let service = Arc::new(ApiClient::new(settings)?);
    let sink = Arc::new(DirectorySink::new(output_dir));
    let orchestrator = DownloadOrchestrator::new(service.clone(), sink, policy);

    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (event_tx, mut event_rx) = mpsc::channel(32);
    let actor = BackendActor::new(service, orchestrator, cmd_rx, event_tx);
    let backend = tokio::spawn(actor.run());

    cmd_tx.send(BackendCommand::SubmitUrl { url }).await?;

    let mut download_requested = false;
    let outcome = loop {
        let Some(event) = event_rx.recv().await else {
            break Err(anyhow::anyhow!("Backend stopped unexpectedly"));
        };

        match event {
            BackendEvent::MetadataStarted { url } => println!("Fetching formats for {}...", url),
            BackendEvent::MetadataReady { info, .. } => {
                println!("Found: {} ({})", info.title, info.duration);
                if !download_requested {
                    download_requested = true;
                    cmd_tx
                        .send(BackendCommand::Download {
                            kind,
                            video_quality: video_quality.clone(),
                            audio_quality: audio_quality.clone(),
                        })
                        .await?;
                }
            }
            BackendEvent::MetadataFailed(error) => break Err(anyhow::anyhow!(error)),
            BackendEvent::DownloadStarted { kind, .. } => println!("Downloading {}...", kind),
            BackendEvent::DownloadCompleted { download, .. } => {
                println!(
                    "Saved {} ({}) to {}",
                    download.filename,
                    utils::format_file_size(Some(download.size_bytes as u64)),
                    download.location.display()
                );
                break Ok(());
            }
            BackendEvent::DownloadFailed { error, .. } => break Err(anyhow::anyhow!(error)),
            BackendEvent::Error(error) => break Err(anyhow::anyhow!(error)),
        }
    };

    let _ = cmd_tx.send(BackendCommand::Shutdown).await;
    backend.await.context("Backend task panicked")?;

    outcome
}
