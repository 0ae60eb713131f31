//! Game state and core simulation types
//!
//! All mutable session data lives in one `GameState` aggregate owned by the
//! caller; the tick function takes it by exclusive reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::{EffectKind, EffectSchedule};
use super::layout::generate_grid;
use super::tick::Direction;
use crate::config::{Bounds, GameConfig, PaddleConfig};
use crate::error::ConfigError;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation suspended, resumable
    Paused,
    /// Every block destroyed (terminal until reset)
    Won,
    /// Lives exhausted (terminal until reset)
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    #[default]
    Plain,
    /// Takes two hits
    Reinforced,
    ExtraLife,
    MultiBall,
    SlowPaddle,
    EnlargePaddle,
    ShrinkPaddle,
    FastBall,
    SlowBall,
}

impl BlockKind {
    pub const ALL: [BlockKind; 9] = [
        BlockKind::Plain,
        BlockKind::Reinforced,
        BlockKind::ExtraLife,
        BlockKind::MultiBall,
        BlockKind::SlowPaddle,
        BlockKind::EnlargePaddle,
        BlockKind::ShrinkPaddle,
        BlockKind::FastBall,
        BlockKind::SlowBall,
    ];

    /// Hits needed to destroy a fresh block of this kind
    pub fn initial_hits(self) -> u8 {
        match self {
            BlockKind::Reinforced => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    Active,
    Destroyed,
}

/// What a single hit did to a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still standing with this many hits left
    Damaged { remaining: u8 },
    /// Transitioned Active -> Destroyed on this hit
    Destroyed,
    /// Block was already destroyed
    Ignored,
}

/// A block entity. Position is fixed once laid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub kind: BlockKind,
    pub status: BlockStatus,
    pub hits_remaining: u8,
}

impl Block {
    pub fn new(row: usize, col: usize, rect: Rect, kind: BlockKind) -> Self {
        Self {
            row,
            col,
            rect,
            kind,
            status: BlockStatus::Active,
            hits_remaining: kind.initial_hits(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BlockStatus::Active
    }

    /// Apply one collision hit
    pub fn hit(&mut self) -> HitOutcome {
        if !self.is_active() {
            return HitOutcome::Ignored;
        }
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        if self.hits_remaining == 0 {
            self.status = BlockStatus::Destroyed;
            HitOutcome::Destroyed
        } else {
            HitOutcome::Damaged {
                remaining: self.hits_remaining,
            }
        }
    }
}

/// Fixed rows x cols arrangement of blocks, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockGrid {
    pub rows: usize,
    pub cols: usize,
    pub blocks: Vec<Block>,
}

impl BlockGrid {
    pub fn get(&self, row: usize, col: usize) -> Option<&Block> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.blocks.get(row * self.cols + col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Block> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.blocks.get_mut(row * self.cols + col)
    }

    pub fn active_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_active()).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.blocks.iter().all(|b| !b.is_active())
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Always equal to `vel.length()`
    pub speed: f32,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            speed: vel.length(),
        }
    }

    /// Replace the speed magnitude, keeping the direction of travel
    pub fn set_speed(&mut self, speed: f32) {
        self.vel = self.vel.normalize_or_zero() * speed;
        self.speed = speed;
    }
}

/// The player's paddle. Sits on the floor and only moves horizontally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity for the current tick
    pub velocity: f32,
    /// Travel per tick while a direction is held
    pub speed: f32,
    pub default_width: f32,
    pub default_speed: f32,
}

impl Paddle {
    /// Centered on the floor; clamped to the bounds if configured wider
    pub fn new(config: &PaddleConfig, bounds: &Bounds) -> Self {
        let width = config.width.min(bounds.width);
        Self {
            x: (bounds.width - width) / 2.0,
            y: bounds.height - config.height,
            width,
            height: config.height,
            velocity: 0.0,
            speed: config.speed,
            default_width: width,
            default_speed: config.speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Level-set velocity from the input direction
    pub fn steer(&mut self, direction: Direction) {
        self.velocity = match direction {
            Direction::Left => -self.speed,
            Direction::Right => self.speed,
            Direction::None => 0.0,
        };
    }

    /// Apply velocity, then clamp to `[0, bounds_width - width]`
    pub fn advance(&mut self, bounds_width: f32) {
        self.x += self.velocity;
        self.clamp_to(bounds_width);
    }

    pub fn clamp_to(&mut self, bounds_width: f32) {
        self.width = self.width.min(bounds_width);
        self.x = self.x.clamp(0.0, (bounds_width - self.width).max(0.0));
    }

    /// Resize around the current center
    pub fn set_width(&mut self, width: f32, bounds_width: f32) {
        let center = self.center_x();
        self.width = width.min(bounds_width);
        self.x = center - self.width / 2.0;
        self.clamp_to(bounds_width);
    }
}

/// Things that happened during the last tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BlockDamaged { row: usize, col: usize, remaining: u8 },
    BlockDestroyed { row: usize, col: usize, kind: BlockKind },
    BonusApplied { kind: BlockKind },
    EffectExpired { kind: EffectKind },
    BallSpawned { id: u32 },
    BallLost { id: u32 },
    LifeLost { remaining: u32 },
    Won,
    Lost,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated configuration the session was built from
    pub config: GameConfig,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Controller clock; advances once per Running tick
    pub time_ticks: u64,
    pub paddle: Paddle,
    /// Live balls (sorted by id for determinism)
    pub balls: Vec<Ball>,
    pub grid: BlockGrid,
    /// Pending paddle-effect reversions
    pub effects: EffectSchedule,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Validate the config and build a fresh Running session
    pub fn start(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let grid = generate_grid(&config.grid, &config.block_types, &mut rng);
        let paddle = Paddle::new(&config.paddle, &config.bounds);

        let mut state = Self {
            phase: GamePhase::Running,
            score: 0,
            lives: config.lives,
            time_ticks: 0,
            paddle,
            balls: Vec::new(),
            grid,
            effects: EffectSchedule::new(),
            events: Vec::new(),
            rng,
            next_id: 1,
            config,
        };
        state.spawn_serve_ball();
        state.events.clear();

        log::info!(
            "Session started: seed={}, grid={}x{}, lives={}",
            state.config.seed,
            state.grid.rows,
            state.grid.cols,
            state.lives
        );
        Ok(state)
    }

    /// Rebuild paddle, ball, grid (reshuffled) and counters; back to Running.
    ///
    /// Re-validates `config`, which callers may have edited since `start`.
    /// On error the session is left untouched.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.config.validate()?;
        self.rebuild();
        Ok(())
    }

    /// Reset under a new configuration, reseeding the layout RNG
    pub fn reset_with(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.rng = Pcg32::seed_from_u64(config.seed);
        self.config = config;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        self.grid = generate_grid(&self.config.grid, &self.config.block_types, &mut self.rng);
        self.paddle = Paddle::new(&self.config.paddle, &self.config.bounds);
        self.balls.clear();
        self.effects.clear();
        self.events.clear();
        self.score = 0;
        self.lives = self.config.lives;
        self.time_ticks = 0;
        self.next_id = 1;
        self.phase = GamePhase::Running;
        self.spawn_serve_ball();

        log::info!("Session reset");
    }

    /// Running -> Paused. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::debug!("Paused at tick {}", self.time_ticks);
            true
        } else {
            false
        }
    }

    /// Paused -> Running. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            log::debug!("Resumed at tick {}", self.time_ticks);
            true
        } else {
            false
        }
    }

    /// Running <-> Paused; terminal phases are left alone
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Won | GamePhase::Lost => false,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Serve position: horizontally centered, `spawn_offset` above the floor
    pub fn spawn_serve_ball(&mut self) -> u32 {
        let pos = Vec2::new(
            self.config.bounds.width / 2.0,
            self.config.bounds.height - self.config.ball.spawn_offset,
        );
        self.spawn_ball(pos)
    }

    /// Spawn resting on top of the paddle's center
    pub fn spawn_ball_at_paddle(&mut self) -> u32 {
        let pos = Vec2::new(
            self.paddle.center_x(),
            self.paddle.y - self.config.ball.radius,
        );
        self.spawn_ball(pos)
    }

    /// New ball at `pos` with the session's base velocity
    fn spawn_ball(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let ball = Ball::new(id, pos, self.config.ball.velocity, self.config.ball.radius);
        self.balls.push(ball);
        self.events.push(GameEvent::BallSpawned { id });
        id
    }

    /// Ensure deterministic iteration order
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_builds_running_session() {
        let state = GameState::start(GameConfig::default()).unwrap();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.grid.blocks.len(), 15);
        assert_eq!(state.grid.active_count(), 15);
        assert!(state.events.is_empty());

        let ball = &state.balls[0];
        assert_eq!(ball.pos, Vec2::new(240.0, 290.0));
        assert_eq!(ball.vel, Vec2::new(2.0, -2.0));
    }

    #[test]
    fn test_start_rejects_invalid_config() {
        let config = GameConfig {
            block_types: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            GameState::start(config),
            Err(ConfigError::EmptyBlockTypes)
        ));
    }

    #[test]
    fn test_block_hit_lifecycle() {
        let mut block = Block::new(0, 0, Rect::new(0.0, 0.0, 10.0, 10.0), BlockKind::Reinforced);
        assert_eq!(block.hits_remaining, 2);

        assert_eq!(block.hit(), HitOutcome::Damaged { remaining: 1 });
        assert!(block.is_active());
        assert_eq!(block.hit(), HitOutcome::Destroyed);
        assert_eq!(block.status, BlockStatus::Destroyed);

        // Destroyed is irreversible and hits never go negative
        assert_eq!(block.hit(), HitOutcome::Ignored);
        assert_eq!(block.hits_remaining, 0);
        assert_eq!(block.status, BlockStatus::Destroyed);
    }

    #[test]
    fn test_ball_set_speed_preserves_direction() {
        let mut ball = Ball::new(1, Vec2::ZERO, Vec2::new(3.0, -4.0), 10.0);
        assert_eq!(ball.speed, 5.0);

        ball.set_speed(10.0);
        assert!((ball.vel.x - 6.0).abs() < 1e-4);
        assert!((ball.vel.y + 8.0).abs() < 1e-4);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_clamps_to_bounds() {
        let bounds = Bounds::default();
        let mut paddle = Paddle::new(&PaddleConfig::default(), &bounds);

        paddle.steer(Direction::Left);
        for _ in 0..100 {
            paddle.advance(bounds.width);
        }
        assert_eq!(paddle.x, 0.0);

        paddle.steer(Direction::Right);
        for _ in 0..100 {
            paddle.advance(bounds.width);
        }
        assert_eq!(paddle.x, bounds.width - paddle.width);
    }

    #[test]
    fn test_oversized_paddle_is_clamped() {
        let bounds = Bounds::default();
        let config = PaddleConfig {
            width: 1000.0,
            ..Default::default()
        };
        let paddle = Paddle::new(&config, &bounds);
        assert_eq!(paddle.width, bounds.width);
        assert_eq!(paddle.x, 0.0);
    }

    #[test]
    fn test_paddle_resize_keeps_center() {
        let bounds = Bounds::default();
        let mut paddle = Paddle::new(&PaddleConfig::default(), &bounds);
        let center = paddle.center_x();

        paddle.set_width(paddle.default_width * 1.5, bounds.width);
        assert!((paddle.center_x() - center).abs() < 1e-4);

        // Near the wall the resize is clamped back inside
        paddle.x = bounds.width - paddle.width;
        paddle.set_width(paddle.default_width * 2.0, bounds.width);
        assert!(paddle.x + paddle.width <= bounds.width);
    }

    #[test]
    fn test_pause_resume_transitions() {
        let mut state = GameState::start(GameConfig::default()).unwrap();

        assert!(!state.resume());
        assert!(state.pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!state.pause());
        assert!(state.resume());
        assert_eq!(state.phase, GamePhase::Running);

        state.phase = GamePhase::Lost;
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Lost);
    }

    #[test]
    fn test_reset_restores_session() {
        let mut state = GameState::start(GameConfig::with_seed(3)).unwrap();
        state.score = 120;
        state.lives = 0;
        state.phase = GamePhase::Lost;
        state.grid.blocks[0].hit();
        state.balls.clear();
        state.effects.activate(EffectKind::PaddleWidth, 1.5, 0, 10);

        state.reset().unwrap();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.balls.len(), 1);
        assert!(!state.grid.all_destroyed());
        assert_eq!(state.grid.active_count(), 15);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_reset_with_rejects_invalid_and_keeps_state() {
        let mut state = GameState::start(GameConfig::default()).unwrap();
        state.score = 50;

        let mut bad = GameConfig::default();
        bad.bounds.height = 0.0;
        assert!(state.reset_with(bad).is_err());
        assert_eq!(state.score, 50);

        let mut good = GameConfig::with_seed(11);
        good.lives = 5;
        state.reset_with(good).unwrap();
        assert_eq!(state.lives, 5);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_revalidates_edited_config() {
        let mut state = GameState::start(GameConfig::with_seed(5)).unwrap();
        state.score = 40;
        state.phase = GamePhase::Lost;
        let kinds: Vec<_> = state.grid.blocks.iter().map(|b| b.kind).collect();

        state.config.block_types.clear();
        assert!(matches!(state.reset(), Err(ConfigError::EmptyBlockTypes)));

        assert_eq!(state.score, 40);
        assert_eq!(state.phase, GamePhase::Lost);
        let after: Vec<_> = state.grid.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, after);

        state.config.block_types = crate::config::default_block_types();
        state.reset().unwrap();
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::start(GameConfig::with_seed(99)).unwrap();
        let b = GameState::start(GameConfig::with_seed(99)).unwrap();
        let kinds_a: Vec<_> = a.grid.blocks.iter().map(|b| b.kind).collect();
        let kinds_b: Vec<_> = b.grid.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}
