//! Brickfall - a renderer-agnostic Breakout engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, entities, bonuses, game loop)
//! - `config`: Data-driven session configuration
//! - `input`: Level-set input latch fed by an external input source
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod input;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;
pub use input::InputLatch;

/// Default configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const BOUNDS_WIDTH: f32 = 480.0;
    pub const BOUNDS_HEIGHT: f32 = 320.0;

    /// Block grid defaults
    pub const GRID_ROWS: usize = 3;
    pub const GRID_COLS: usize = 5;
    pub const BLOCK_WIDTH: f32 = 75.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_PADDING: f32 = 10.0;
    pub const GRID_OFFSET_LEFT: f32 = 30.0;
    pub const GRID_OFFSET_TOP: f32 = 30.0;

    /// Paddle defaults (sits on the floor)
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 7.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_DX: f32 = 2.0;
    pub const BALL_DY: f32 = -2.0;
    /// Spawn height above the floor
    pub const BALL_SPAWN_OFFSET: f32 = 30.0;
    pub const BALL_MIN_SPEED: f32 = 1.0;
    pub const BALL_MAX_SPEED: f32 = 10.0;

    /// Session defaults
    pub const START_LIVES: u32 = 3;
    pub const SCORE_PER_BLOCK: u64 = 10;

    /// Timed effect length (10 seconds at the 100 Hz source cadence)
    pub const EFFECT_DURATION_TICKS: u64 = 1000;
    pub const SLOW_PADDLE_FACTOR: f32 = 0.5;
    pub const ENLARGE_PADDLE_FACTOR: f32 = 1.5;
    pub const SHRINK_PADDLE_FACTOR: f32 = 0.6;
    pub const FAST_BALL_FACTOR: f32 = 1.5;
    pub const SLOW_BALL_FACTOR: f32 = 0.75;
}
