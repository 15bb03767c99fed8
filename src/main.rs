//! Laser Gallery headless runner
//!
//! Drives the simulation with a synthetic clock and prints snapshots as JSON
//! lines on stdout. Logs go to stderr (`RUST_LOG` to adjust).
//!
//! Example:
//!   laser-gallery --seed 7 --frames 3600 --autopilot --snapshot-every 60

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use laser_gallery::SimConfig;
use laser_gallery::sim::{GamePhase, GameState, autopilot_inputs, frame};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a laser gallery session headless", long_about = None)]
struct Args {
    /// JSON config file (missing fields take defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Synthetic frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Let the demo controller play
    #[arg(long)]
    autopilot: bool,
    /// Print a snapshot every N frames (0: only the last one)
    #[arg(long, default_value_t = 60)]
    snapshot_every: u64,
    /// Keep running after game over instead of stopping
    #[arg(long)]
    keep_going: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    let mut state = GameState::new(config, args.seed, 0.0).context("start session")?;
    log::info!(
        "Running {} frames at {} fps (autopilot: {})",
        args.frames,
        args.fps,
        args.autopilot
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let dt = 1.0 / args.fps;

    for i in 1..=args.frames {
        let now = i as f64 * dt;
        let inputs = if args.autopilot {
            autopilot_inputs(&state, now)
        } else {
            Vec::new()
        };
        frame(&mut state, now, &inputs);

        let game_over = state.phase == GamePhase::GameOver;
        let stop = game_over && !args.keep_going;
        let last = i == args.frames || stop;
        if last || (args.snapshot_every > 0 && i % args.snapshot_every == 0) {
            serde_json::to_writer(&mut out, &state.snapshot()).context("write snapshot")?;
            writeln!(out).context("write snapshot")?;
        }
        if stop {
            break;
        }
    }
    out.flush().context("flush stdout")?;

    let stats = &state.stats;
    log::info!(
        "Finished after {} frames: score {}, level {}, {} spawned, {} shots, {} hits, {} captures",
        stats.frames,
        state.score.display_score(),
        state.score.level,
        stats.spawned,
        stats.shots,
        stats.hits,
        stats.captures
    );
    Ok(())
}
