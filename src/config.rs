//! Session configuration
//!
//! Everything `start`/`reset` needs to build a session: playfield bounds, grid
//! geometry, entity sizes, bonus tuning and the block-type sequence. Loaded from
//! JSON or built from defaults, then validated before any geometry is created.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::BlockKind;

/// Playfield size. Origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: BOUNDS_WIDTH,
            height: BOUNDS_HEIGHT,
        }
    }
}

/// Block grid geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub block_width: f32,
    pub block_height: f32,
    /// Gap between neighbouring cells
    pub padding: f32,
    pub offset_left: f32,
    pub offset_top: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            padding: BLOCK_PADDING,
            offset_left: GRID_OFFSET_LEFT,
            offset_top: GRID_OFFSET_TOP,
        }
    }
}

impl GridConfig {
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal travel per tick while a direction is held
    pub speed: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Base velocity for every freshly spawned ball
    pub velocity: Vec2,
    /// Spawn height above the floor for serve/replacement balls
    pub spawn_offset: f32,
    /// Speed bonuses never push a ball below this
    pub min_speed: f32,
    /// ...or above this
    pub max_speed: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            velocity: Vec2::new(BALL_DX, BALL_DY),
            spawn_offset: BALL_SPAWN_OFFSET,
            min_speed: BALL_MIN_SPEED,
            max_speed: BALL_MAX_SPEED,
        }
    }
}

/// Power-up tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    pub slow_paddle_factor: f32,
    pub enlarge_factor: f32,
    pub shrink_factor: f32,
    pub fast_ball_factor: f32,
    pub slow_ball_factor: f32,
    /// How long paddle effects last before reverting
    pub effect_duration_ticks: u64,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            slow_paddle_factor: SLOW_PADDLE_FACTOR,
            enlarge_factor: ENLARGE_PADDLE_FACTOR,
            shrink_factor: SHRINK_PADDLE_FACTOR,
            fast_ball_factor: FAST_BALL_FACTOR,
            slow_ball_factor: SLOW_BALL_FACTOR,
            effect_duration_ticks: EFFECT_DURATION_TICKS,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub bounds: Bounds,
    pub grid: GridConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bonus: BonusConfig,
    pub lives: u32,
    pub score_per_block: u64,
    /// Ordered block-type tokens, shuffled once per session
    pub block_types: Vec<BlockKind>,
    /// Layout RNG seed
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            grid: GridConfig::default(),
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bonus: BonusConfig::default(),
            lives: START_LIVES,
            score_per_block: SCORE_PER_BLOCK,
            block_types: default_block_types(),
            seed: 0,
        }
    }
}

/// One token per kind plus plain filler, sized for the default 3x5 grid
pub fn default_block_types() -> Vec<BlockKind> {
    use BlockKind::*;
    vec![
        Plain,
        Plain,
        Plain,
        Plain,
        Plain,
        Plain,
        Reinforced,
        Reinforced,
        ExtraLife,
        MultiBall,
        SlowPaddle,
        EnlargePaddle,
        ShrinkPaddle,
        FastBall,
        SlowBall,
    ]
}

impl GameConfig {
    /// Default config with a different layout seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that would produce undefined geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Bounds { width, height } = self.bounds;
        if !is_positive(width) || !is_positive(height) {
            return Err(ConfigError::InvalidBounds { width, height });
        }

        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigError::InvalidGrid {
                rows: self.grid.rows,
                cols: self.grid.cols,
            });
        }

        let sizes = [
            ("grid.block_width", self.grid.block_width),
            ("grid.block_height", self.grid.block_height),
            ("paddle.width", self.paddle.width),
            ("paddle.height", self.paddle.height),
            ("paddle.speed", self.paddle.speed),
            ("ball.radius", self.ball.radius),
        ];
        for (field, value) in sizes {
            if !is_positive(value) {
                return Err(ConfigError::InvalidSize { field, value });
            }
        }
        for (field, value) in [
            ("grid.padding", self.grid.padding),
            ("grid.offset_left", self.grid.offset_left),
            ("grid.offset_top", self.grid.offset_top),
            ("ball.spawn_offset", self.ball.spawn_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSize { field, value });
            }
        }

        if self.block_types.is_empty() {
            return Err(ConfigError::EmptyBlockTypes);
        }

        if !self.ball.velocity.is_finite() || self.ball.velocity == Vec2::ZERO {
            return Err(ConfigError::ZeroBallVelocity);
        }

        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }

        let bonus = &self.bonus;
        if bonus.effect_duration_ticks == 0 {
            return Err(ConfigError::InvalidEffectDuration);
        }
        for (field, value) in [
            ("bonus.slow_paddle_factor", bonus.slow_paddle_factor),
            ("bonus.enlarge_factor", bonus.enlarge_factor),
            ("bonus.shrink_factor", bonus.shrink_factor),
            ("bonus.fast_ball_factor", bonus.fast_ball_factor),
            ("bonus.slow_ball_factor", bonus.slow_ball_factor),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::InvalidFactor { field, value });
            }
        }

        let (min, max) = (self.ball.min_speed, self.ball.max_speed);
        if !is_positive(min) || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidSpeedRange { min, max });
        }
        let speed = self.ball.velocity.length();
        if speed < min || speed > max {
            return Err(ConfigError::BaseSpeedOutOfRange { speed, min, max });
        }

        Ok(())
    }
}

#[inline]
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_types.len(), config.grid.cell_count());
    }

    #[test]
    fn test_rejects_zero_bounds() {
        let mut config = GameConfig::default();
        config.bounds.width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));

        config.bounds.width = 480.0;
        config.bounds.height = -5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_block_types() {
        let config = GameConfig {
            block_types: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBlockTypes)));
    }

    #[test]
    fn test_rejects_degenerate_grid_and_sizes() {
        let mut config = GameConfig::default();
        config.grid.cols = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGrid { .. })));

        let mut config = GameConfig::default();
        config.ball.radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSize { field: "ball.radius", .. })
        ));

        let mut config = GameConfig::default();
        config.ball.velocity = Vec2::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroBallVelocity)));
    }

    #[test]
    fn test_rejects_base_speed_outside_limits() {
        let mut config = GameConfig::default();
        config.ball.velocity = Vec2::new(9.0, -9.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BaseSpeedOutOfRange { .. })
        ));

        config.ball.velocity = Vec2::new(0.3, -0.3);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BaseSpeedOutOfRange { .. })
        ));

        // Boundaries are inclusive
        config.ball.velocity = Vec2::new(0.0, -config.ball.max_speed);
        assert!(config.validate().is_ok());
        config.ball.velocity = Vec2::new(config.ball.min_speed, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let mut config = GameConfig::default();
        config.ball.min_speed = 5.0;
        config.ball.max_speed = 2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedRange { .. })
        ));
    }

    #[test]
    fn test_from_file_reports_missing_path() {
        let err = GameConfig::from_file("no/such/brickfall.json").unwrap_err();
        assert!(matches!(&err, ConfigError::Io { path, .. } if path == "no/such/brickfall.json"));
        assert!(err.to_string().starts_with("Failed to read config 'no/such/brickfall.json'"));
    }

    #[test]
    fn test_wide_paddle_is_not_an_error() {
        // Clamped at session build time instead
        let mut config = GameConfig::default();
        config.paddle.width = 10_000.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{
            "grid": { "rows": 4, "cols": 8 },
            "block_types": ["plain", "reinforced", "multi-ball"],
            "seed": 42
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.grid.rows, 4);
        assert_eq!(config.grid.cols, 8);
        assert_eq!(config.grid.block_width, BLOCK_WIDTH);
        assert_eq!(
            config.block_types,
            vec![BlockKind::Plain, BlockKind::Reinforced, BlockKind::MultiBall]
        );
        assert_eq!(config.seed, 42);
        assert_eq!(config.lives, START_LIVES);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "block_types": [] }"#),
            Err(ConfigError::EmptyBlockTypes)
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "block_types": ["laser"] }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_preserves_config() {
        let config = GameConfig::with_seed(7);
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
