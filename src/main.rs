//! Flappy Gap entry point
//!
//! Loads settings, takes over the terminal and runs the game loop.
//! Usage: `flappy-gap [settings.json]`. Logs go to stderr (`RUST_LOG`).

use std::path::PathBuf;
use std::process::ExitCode;

use flappy_gap::clock::SystemClock;
use flappy_gap::game_loop::{self, RunSummary};
use flappy_gap::platform::terminal::{TerminalGuard, TerminalInput};
use flappy_gap::renderer::TerminalRenderer;
use flappy_gap::sim::PcgRandom;
use flappy_gap::{Result, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flappy Gap starting...");

    match run() {
        Ok(summary) => {
            log::info!(
                "Bye! {} ticks, {} games, best score {}",
                summary.ticks,
                summary.games_played,
                summary.best_score
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Shown even when RUST_LOG is unset
            eprintln!("flappy-gap: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<RunSummary> {
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    let mut rng = PcgRandom::new(settings.seed.unwrap_or_else(rand::random));
    log::info!("Pipe seed: {}", rng.seed());

    // Restores the terminal on every exit path, including errors below
    let _guard = TerminalGuard::enter()?;
    let mut input = TerminalInput::new();
    let mut renderer = TerminalRenderer::new(std::io::stdout());
    let mut clock = SystemClock::new();

    game_loop::run(settings, &mut input, &mut renderer, &mut clock, &mut rng)
}
