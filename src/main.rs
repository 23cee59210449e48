//! Galton Board host runner
//!
//! Drives the simulation the way the device loop does: poll buttons, tick,
//! flush the frame, yield while idle. Frames go to the terminal.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};

use galton_board::consts::{ANIMATION_FRAME_MS, IDLE_SLEEP_MS};
use galton_board::platform::{DisplaySink, InputSource, NullDisplay, ScriptedInput, TerminalDisplay};
use galton_board::renderer::FrameBuffer;
use galton_board::sim::{Board, Phase, RunSummary, TickInput, TickOutcome, seeded, tick};
use galton_board::{BoardConfig, BoardPreset};

#[derive(Parser, Debug)]
#[command(name = "galton-board", version, about = "Galton board simulation")]
struct Args {
    /// JSON board configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in layout: classic, dense, tiny (ignored with --config)
    #[arg(short, long)]
    preset: Option<String>,

    /// RNG seed (defaults to the current time); run k uses seed + k
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of runs to perform
    #[arg(short, long, default_value_t = 1)]
    runs: u32,

    /// Animate in real time on the terminal
    #[arg(short, long)]
    animate: bool,

    /// Delay between frames while animating (milliseconds)
    #[arg(long, default_value_t = ANIMATION_FRAME_MS)]
    frame_ms: u64,

    /// Simulated time per tick when not animating (microseconds)
    #[arg(long, default_value_t = 10_000)]
    tick_us: u64,

    /// Print run summaries as JSON instead of the final board
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<BoardConfig> {
    if let Some(path) = &args.config {
        return BoardConfig::load(path);
    }
    let preset = match &args.preset {
        Some(name) => BoardPreset::from_str(name)
            .with_context(|| format!("Unknown preset '{}'", name))?,
        None => BoardPreset::default(),
    };
    info!("Using {} preset", preset.as_str());
    let config = BoardConfig::from_preset(preset);
    config.validate()?;
    Ok(config)
}

fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

/// Pause after a flushed frame so the animation is watchable
fn frame_delay(animate: bool, frame_ms: u64) -> Option<Duration> {
    (animate && frame_ms > 0).then(|| Duration::from_millis(frame_ms))
}

/// Run one board from start press to natural completion
fn run_once(
    board: &mut Board,
    fb: &mut FrameBuffer,
    display: &mut dyn DisplaySink,
    seed: u64,
    args: &Args,
) -> RunSummary {
    let mut bits = seeded(seed);
    let mut input = ScriptedInput::new([TickInput::start()]);
    let started = Instant::now();
    let mut virtual_now = 0u64;

    loop {
        let now_us = if args.animate {
            started.elapsed().as_micros() as u64
        } else {
            virtual_now += args.tick_us;
            virtual_now
        };

        let pressed = input.poll();
        match tick(board, &pressed, now_us, fb, &mut bits) {
            TickOutcome::Rendered | TickOutcome::Cleared => {
                display.flush(fb);
                if let Some(delay) = frame_delay(args.animate, args.frame_ms) {
                    std::thread::sleep(delay);
                }
            }
            TickOutcome::Idle => {
                if board.phase == Phase::Finished {
                    break;
                }
                std::thread::sleep(Duration::from_millis(IDLE_SLEEP_MS));
            }
        }
    }

    debug!("Run took {:.3}s wall time", started.elapsed().as_secs_f64());
    board.summary(seed)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }
    if args.tick_us == 0 {
        bail!("--tick-us must be positive");
    }

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(default_seed);
    info!("Galton board starting (seed {})", seed);

    let mut board = Board::new(config.clone());
    let mut fb = FrameBuffer::new(config.display_width, config.display_height);
    let stdout = std::io::stdout();
    let mut summaries = Vec::with_capacity(args.runs as usize);

    if args.animate {
        print!("\x1b[2J");
    }

    for run in 0..args.runs {
        let run_seed = seed.wrapping_add(run as u64);
        let summary = if args.animate {
            let mut display = TerminalDisplay::new(stdout.lock(), true);
            run_once(&mut board, &mut fb, &mut display, run_seed, &args)
        } else {
            run_once(&mut board, &mut fb, &mut NullDisplay, run_seed, &args)
        };
        info!(
            "Run {} finished: {} balls, counts {:?}",
            run + 1,
            summary.spawned,
            summary.counts
        );

        if !args.json && !args.animate {
            TerminalDisplay::new(stdout.lock(), false).flush(&fb);
        }
        summaries.push(summary);
    }

    let mut out = stdout.lock();
    if args.json {
        let json = serde_json::to_string_pretty(&summaries)
            .context("Failed to serialize run summaries")?;
        writeln!(out, "{json}")?;
    } else {
        for summary in &summaries {
            writeln!(
                out,
                "seed {}: {:?} (mode bin {})",
                summary.seed,
                summary.counts,
                summary.mode().unwrap_or(0)
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delay_only_when_animating() {
        assert_eq!(frame_delay(true, 30), Some(Duration::from_millis(30)));
        assert_eq!(frame_delay(false, 30), None);
        assert_eq!(frame_delay(true, 0), None);
    }

    #[test]
    fn test_frame_ms_flag() {
        let args = Args::parse_from(["galton-board", "--animate", "--frame-ms", "50"]);
        assert!(args.animate);
        assert_eq!(args.frame_ms, 50);
        let args = Args::parse_from(["galton-board"]);
        assert_eq!(args.frame_ms, ANIMATION_FRAME_MS);
    }
}
