//! Power-up resolution
//!
//! Maps a destroyed block's kind to the side effects it triggers. Resolution is
//! pure; the tick applies the returned effects to the session afterwards.

use super::effects::EffectKind;
use super::state::BlockKind;
use crate::config::GameConfig;

/// A session mutation requested by a destroyed block
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SideEffect {
    AwardScore(u64),
    GainLife,
    /// One extra ball at the paddle with base velocity
    SpawnBall,
    /// Timed multiplier on a paddle stat, reverted after `effect_duration_ticks`
    Timed { kind: EffectKind, factor: f32 },
    /// Permanent multiplier on every live ball's speed
    ScaleBallSpeed(f32),
}

/// Side effects for a block that just transitioned to Destroyed
///
/// Damage that leaves a block standing never reaches this function.
pub fn on_block_destroyed(kind: BlockKind, config: &GameConfig) -> Vec<SideEffect> {
    let bonus = &config.bonus;
    let mut effects = vec![SideEffect::AwardScore(config.score_per_block)];

    match kind {
        BlockKind::Plain | BlockKind::Reinforced => {}
        BlockKind::ExtraLife => effects.push(SideEffect::GainLife),
        BlockKind::MultiBall => effects.push(SideEffect::SpawnBall),
        BlockKind::SlowPaddle => effects.push(SideEffect::Timed {
            kind: EffectKind::PaddleSpeed,
            factor: bonus.slow_paddle_factor,
        }),
        BlockKind::EnlargePaddle => effects.push(SideEffect::Timed {
            kind: EffectKind::PaddleWidth,
            factor: bonus.enlarge_factor,
        }),
        BlockKind::ShrinkPaddle => effects.push(SideEffect::Timed {
            kind: EffectKind::PaddleWidth,
            factor: bonus.shrink_factor,
        }),
        BlockKind::FastBall => effects.push(SideEffect::ScaleBallSpeed(bonus.fast_ball_factor)),
        BlockKind::SlowBall => effects.push(SideEffect::ScaleBallSpeed(bonus.slow_ball_factor)),
    }

    effects
}

/// True for kinds that do more than award score
pub fn is_bonus(kind: BlockKind) -> bool {
    !matches!(kind, BlockKind::Plain | BlockKind::Reinforced)
}
