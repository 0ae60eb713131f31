//! Error types for session configuration.

use thiserror::Error;

/// Reasons a [`GameConfig`](crate::config::GameConfig) is rejected at start or reset.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Playfield must have a positive, finite area.
    #[error("Invalid bounds: {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    /// Grid needs at least one row and one column.
    #[error("Invalid grid: {rows} rows x {cols} cols")]
    InvalidGrid { rows: usize, cols: usize },

    /// A size field (block, paddle, ball) was zero, negative or not finite.
    #[error("Invalid {field}: {value}")]
    InvalidSize { field: &'static str, value: f32 },

    /// No block types to lay out.
    #[error("Block type sequence is empty")]
    EmptyBlockTypes,

    /// The base ball velocity would never move the ball.
    #[error("Ball velocity must be non-zero")]
    ZeroBallVelocity,

    #[error("Session must start with at least one life")]
    NoLives,

    #[error("Effect duration must be at least one tick")]
    InvalidEffectDuration,

    /// Bonus multipliers must be positive and finite.
    #[error("Invalid bonus factor {field}: {value}")]
    InvalidFactor { field: &'static str, value: f32 },

    /// Speed limits must be positive and ordered.
    #[error("Invalid ball speed range: [{min}, {max}]")]
    InvalidSpeedRange { min: f32, max: f32 },

    /// The base ball speed must already lie within the clamp range.
    #[error("Base ball speed {speed} is outside [{min}, {max}]")]
    BaseSpeedOutOfRange { speed: f32, min: f32, max: f32 },

    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON could not be parsed into a config.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
