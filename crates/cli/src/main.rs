mod clock;
mod error;
mod output;
mod script;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use argh::FromArgs;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trim_engine::{
    FfmpegThumbnailSource, PlaybackControl, ThumbnailPlan, TrimConfig, TrimErrorKind, TrimSession,
    TrimSnapshot, compute_geometry, generate_strip, probe_video_duration_ms,
};

use clock::{ClockHandle, ClockPlayer};
use error::CliError;
use output::JsonLinesObserver;

/// Replays a trim gesture script against a simulated player and prints every
/// session notification as a JSON line.
#[derive(FromArgs)]
struct Args {
    /// viewer config (JSON); defaults apply when omitted
    #[argh(option)]
    config: Option<PathBuf>,

    /// video file whose duration is probed with ffprobe
    #[argh(option)]
    video: Option<PathBuf>,

    /// video duration in milliseconds, used when no video is given
    #[argh(option)]
    duration_ms: Option<u64>,

    /// directory for the thumbnail strip JPEGs (requires --video)
    #[argh(option)]
    thumbnails_dir: Option<PathBuf>,

    /// gesture script: a JSON array of steps
    #[argh(positional)]
    script: PathBuf,
}

#[derive(Serialize)]
struct SnapshotLine {
    snapshot: TrimSnapshot,
    start_label: String,
    end_label: String,
}

fn main() -> ExitCode {
    init_tracing();

    let args: Args = argh::from_env();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                CliError::Engine(engine_error) => {
                    error!(kind = ?TrimErrorKind::from(engine_error), %err, "trim run failed");
                }
                _ => error!(%err, "trim run failed"),
            }
            eprintln!("trim: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => TrimConfig::from_json_file(path)?,
        None => TrimConfig::default(),
    };
    let duration_ms = match (&args.video, args.duration_ms) {
        (Some(video), _) => probe_video_duration_ms(video)?,
        (None, Some(duration_ms)) => duration_ms,
        (None, None) => return Err(CliError::MissingDuration),
    };

    if let (Some(video), Some(dir)) = (&args.video, &args.thumbnails_dir) {
        write_thumbnail_strip(&config, video, duration_ms, dir)?;
    }

    let steps = script::load_script(&args.script)?;
    let clock = ClockHandle::new(ClockPlayer::new(duration_ms));
    let stdout = std::io::stdout();
    let mut observer = JsonLinesObserver::new(stdout.lock());

    let mut session = TrimSession::new(&config, clock.clone(), &mut observer)?;
    for step in steps {
        script::apply_step(&mut session, &clock, step);
    }
    let line = SnapshotLine {
        snapshot: session.snapshot(),
        start_label: session.start_label(),
        end_label: session.end_label(),
    };
    drop(session.close());
    let player = clock.snapshot();
    info!(
        position_ms = player.status().position_ms,
        volume = player.volume(),
        "replay finished"
    );

    observer.write_line(&line);
    observer.finish().map(drop).map_err(CliError::Output)?;
    Ok(())
}

fn write_thumbnail_strip(
    config: &TrimConfig,
    video: &Path,
    duration_ms: u64,
    dir: &Path,
) -> Result<(), CliError> {
    let geometry = compute_geometry(config.viewer_width_px, config.viewer_height_px)?;
    let plan = ThumbnailPlan::new(video, duration_ms, &geometry, config.thumbnail_quality);
    let strip = generate_strip(&FfmpegThumbnailSource, &plan)?;

    std::fs::create_dir_all(dir).map_err(|source| CliError::ThumbnailWrite {
        path: dir.to_path_buf(),
        source,
    })?;
    for thumbnail in &strip {
        let path = dir.join(format!("thumb_{:03}.jpg", thumbnail.index));
        std::fs::write(&path, &thumbnail.bytes)
            .map_err(|source| CliError::ThumbnailWrite { path, source })?;
    }
    info!(count = strip.len(), dir = %dir.display(), "thumbnail strip written");
    Ok(())
}
