// src/main.rs

mod bbox;
mod config;
mod display;
mod fps;
mod input;
mod overlay;
mod session;
mod source;
mod tracker;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::display::DisplaySink;
use crate::session::TrackingSession;
use crate::source::VideoSource;
use crate::tracker::TrackerKind;

#[derive(Parser, Debug)]
#[command(name = "roi-tracker", about = "Interactive single-object video tracking")]
struct Args {
    /// Input video file path; omit to use the live camera
    #[arg(long, value_name = "PATH")]
    video: Option<PathBuf>,

    /// Tracking algorithm
    #[arg(short, long, value_enum, default_value_t = TrackerKind::Csrt)]
    tracker: TrackerKind,

    /// Optional YAML file overriding display/overlay defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose {
            "roi_tracker=debug"
        } else {
            "roi_tracker=info"
        })
        .init();

    info!("✓ Tracker: {}", args.tracker.label());

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let mut source = match &args.video {
        Some(path) => VideoSource::open_file(path)?,
        None => VideoSource::open_camera(Duration::from_millis(config.display.camera_warmup_ms))?,
    };

    let mut display = DisplaySink::open(&config.display.window_title, config.display.poll_timeout_ms)?;
    let mut session = TrackingSession::new(Box::new(args.tracker), config);

    let summary = session.run(&mut source, &mut display)?;
    info!(
        "✓ Session finished ({:?}) after {} frames",
        summary.outcome, summary.frames
    );
    Ok(())
}
