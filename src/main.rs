//! Brickfall headless runner
//!
//! Plays a session on autopilot and prints the final snapshot as JSON.
//!
//! Usage: `brickfall [config.json] [max_ticks]`

use std::process::ExitCode;

use brickfall::sim::{GamePhase, GameState, tick};
use brickfall::{GameConfig, InputLatch};

const DEFAULT_MAX_TICKS: u64 = 100_000;
/// Progress log cadence (10 seconds at 100 Hz)
const LOG_EVERY: u64 = 1000;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    let max_ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let mut state = match GameState::start(config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Invalid config: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut latch = InputLatch::new();
    latch.set_autopilot(true);

    while state.phase == GamePhase::Running && state.time_ticks < max_ticks {
        tick(&mut state, &latch.take());
        if state.time_ticks % LOG_EVERY == 0 {
            log::info!(
                "tick {}: score={} lives={} blocks={} balls={}",
                state.time_ticks,
                state.score,
                state.lives,
                state.grid.active_count(),
                state.balls.len()
            );
        }
    }

    log::info!("Finished in {:?} after {} ticks", state.phase, state.time_ticks);
    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to serialize snapshot: {}", err);
            ExitCode::FAILURE
        }
    }
}
