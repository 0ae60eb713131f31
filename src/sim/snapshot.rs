//! Render-ready view of a session
//!
//! The renderer reads this after every tick; it never touches `GameState`
//! directly and the simulation never draws.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::EffectKind;
use super::state::{BlockKind, BlockStatus, GameEvent, GamePhase, GameState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallView {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockView {
    pub rect: Rect,
    pub status: BlockStatus,
    pub kind: BlockKind,
    /// Lets the renderer draw cracked reinforced blocks
    pub hits_remaining: u8,
}

/// Active timed effect with its remaining duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub remaining_ticks: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub paddle: Rect,
    pub balls: Vec<BallView>,
    pub blocks: Vec<BlockView>,
    pub effects: Vec<EffectView>,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            paddle: self.paddle.rect(),
            balls: self
                .balls
                .iter()
                .map(|b| BallView {
                    id: b.id,
                    center: b.pos,
                    radius: b.radius,
                })
                .collect(),
            blocks: self
                .grid
                .blocks
                .iter()
                .map(|b| BlockView {
                    rect: b.rect,
                    status: b.status,
                    kind: b.kind,
                    hits_remaining: b.hits_remaining,
                })
                .collect(),
            effects: self
                .effects
                .active()
                .iter()
                .map(|e| EffectView {
                    kind: e.kind,
                    remaining_ticks: e.deadline.saturating_sub(self.time_ticks),
                })
                .collect(),
            events: self.events.clone(),
        }
    }
}
