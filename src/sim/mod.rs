//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, timed effects counted in ticks
//! - Seeded RNG only
//! - Stable iteration order (balls by ID, blocks row-major)
//! - No rendering or platform dependencies

pub mod bonus;
pub mod collision;
pub mod effects;
pub mod layout;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use bonus::{SideEffect, on_block_destroyed};
pub use collision::{Rect, ball_lost, intersects_rect, paddle_hit, reflect_off_bound};
pub use effects::{EffectKind, EffectSchedule, EffectToken, TimedEffect};
pub use layout::{generate_grid, shuffle_kinds};
pub use snapshot::{BallView, BlockView, EffectView, Snapshot};
pub use state::{
    Ball, Block, BlockGrid, BlockKind, BlockStatus, GameEvent, GamePhase, GameState, HitOutcome,
    Paddle,
};
pub use tick::{Direction, TickInput, tick};
