//! Pixel Invaders entry point
//!
//! Runs the game headlessly: an autopilot plays against a recording surface
//! with procedurally generated sprites. A windowed frontend plugs a real
//! `RenderSurface`/`InputDevice` pair into the same `Runner`.
//!
//! Usage: `pixel-invaders [settings.json] [--frames N] [--seed N] [--realtime]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use pixel_invaders::assets::{ProceduralAssets, SpriteSheet};
use pixel_invaders::platform::Autopilot;
use pixel_invaders::renderer::RecordingSurface;
use pixel_invaders::session::Runner;
use pixel_invaders::{GameError, Settings};

/// Frames the demo plays when no budget is given (one minute at 60 Hz)
const DEFAULT_FRAMES: u64 = 60 * 60;

struct Args {
    settings_path: Option<PathBuf>,
    frames: u64,
    seed: u64,
    realtime: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        settings_path: None,
        frames: DEFAULT_FRAMES,
        seed: 0x5eed,
        realtime: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => {
                let value = iter.next().ok_or("--frames needs a value")?;
                args.frames = value.parse().map_err(|_| format!("bad frame count: {value}"))?;
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = value.parse().map_err(|_| format!("bad seed: {value}"))?;
            }
            "--realtime" => args.realtime = true,
            path => args.settings_path = Some(PathBuf::from(path)),
        }
    }
    Ok(args)
}

fn run(args: Args) -> Result<(), GameError> {
    let settings = match &args.settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.validate()?;

    let assets = ProceduralAssets::new(settings.screen_width, settings.screen_height);
    let sheet = Arc::new(SpriteSheet::load(&assets)?);

    let mut runner = Runner::new(settings, sheet, args.seed);
    runner.realtime = args.realtime;
    runner.max_frames = Some(args.frames);

    let mut surface = RecordingSurface::new();
    let mut pilot = Autopilot::default();
    let summary = runner.run(&mut surface, &mut pilot);

    log::info!(
        "Played {} frames over {} sessions, best level {}",
        summary.frames,
        summary.sessions,
        summary.best_level
    );
    println!(
        "frames: {}  sessions: {}  best level: {}",
        summary.frames, summary.sessions, summary.best_level
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pixel Invaders (headless) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: pixel-invaders [settings.json] [--frames N] [--seed N] [--realtime]");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
