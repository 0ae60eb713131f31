//! Fixed-cadence simulation tick
//!
//! Core game loop that advances the session deterministically. Per tick:
//! expire timed effects, move the paddle, move and collide every ball
//! (bounds, then paddle, then blocks in row-major order), apply bonuses,
//! drop lost balls, then settle lives and the win/loss phase.

use serde::{Deserialize, Serialize};

use super::bonus::{SideEffect, is_bonus, on_block_destroyed};
use super::collision::{Rect, ball_lost, intersects_rect, paddle_hit, reflect_off_bound};
use super::effects::EffectKind;
use super::state::{Ball, BlockGrid, BlockKind, GameEvent, GamePhase, GameState, HitOutcome};
use crate::config::Bounds;

/// Paddle directional intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held paddle direction
    pub direction: Direction,
    /// Running <-> Paused
    pub toggle_pause: bool,
    /// Rebuild the session from its config
    pub reset: bool,
    /// Demo mode - paddle follows the lowest ball
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.reset {
        if let Err(err) = state.reset() {
            log::error!("Reset rejected, session unchanged: {}", err);
        }
        return;
    }

    // Pause toggle consumes the tick
    if input.toggle_pause {
        state.toggle_pause();
        return;
    }

    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    expire_effects(state);

    // Update paddle position
    let direction = if input.autopilot {
        autopilot_direction(state)
    } else {
        input.direction
    };
    state.paddle.steer(direction);
    state.paddle.advance(state.config.bounds.width);

    // Collision detection and response
    let paddle_rect = state.paddle.rect();
    let bounds = state.config.bounds;

    // Destroyed kinds in hit order (bonuses deferred to avoid borrow issues)
    let mut destroyed: Vec<BlockKind> = Vec::new();

    for ball in &mut state.balls {
        advance_ball(
            ball,
            &paddle_rect,
            &bounds,
            &mut state.grid,
            &mut state.events,
            &mut destroyed,
        );
    }

    for kind in destroyed {
        for effect in on_block_destroyed(kind, &state.config) {
            apply_side_effect(state, effect);
        }
        if is_bonus(kind) {
            log::debug!("Bonus {:?} applied at tick {}", kind, state.time_ticks);
            state.events.push(GameEvent::BonusApplied { kind });
        }
    }

    // Remove balls that fell past the floor
    let events = &mut state.events;
    state.balls.retain(|ball| {
        if ball_lost(ball.pos, ball.radius, bounds.height) {
            events.push(GameEvent::BallLost { id: ball.id });
            false
        } else {
            true
        }
    });

    // Check if all balls lost
    if state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        if state.lives == 0 {
            state.phase = GamePhase::Lost;
            state.events.push(GameEvent::Lost);
            log::info!("Game over: score {} at tick {}", state.score, state.time_ticks);
        } else {
            log::debug!("Life lost, {} remaining", state.lives);
            state.spawn_serve_ball();
        }
    }

    // Lost takes precedence when both happen on the same tick
    if state.phase == GamePhase::Running && state.grid.all_destroyed() {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Board cleared: score {} at tick {}", state.score, state.time_ticks);
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Move one ball and resolve its collisions for this tick
///
/// Every overlapping block is hit, so a ball straddling two blocks damages
/// both and flips its vertical velocity once per block.
fn advance_ball(
    ball: &mut Ball,
    paddle: &Rect,
    bounds: &Bounds,
    grid: &mut BlockGrid,
    events: &mut Vec<GameEvent>,
    destroyed: &mut Vec<BlockKind>,
) {
    ball.pos += ball.vel;

    // Side walls and ceiling; the floor is open
    ball.vel.x = reflect_off_bound(ball.pos.x, ball.vel.x, 0.0, bounds.width, ball.radius);
    ball.vel.y = reflect_off_bound(ball.pos.y, ball.vel.y, 0.0, f32::INFINITY, ball.radius);

    // Only a descending ball bounces, so an overlapping ball can't flip twice
    if ball.vel.y > 0.0 && paddle_hit(ball.pos, ball.radius, paddle) {
        ball.vel.y = -ball.vel.y;
    }

    for block in grid.blocks.iter_mut().filter(|b| b.is_active()) {
        if !intersects_rect(ball.pos, ball.radius, &block.rect) {
            continue;
        }
        ball.vel.y = -ball.vel.y;
        match block.hit() {
            HitOutcome::Damaged { remaining } => events.push(GameEvent::BlockDamaged {
                row: block.row,
                col: block.col,
                remaining,
            }),
            HitOutcome::Destroyed => {
                events.push(GameEvent::BlockDestroyed {
                    row: block.row,
                    col: block.col,
                    kind: block.kind,
                });
                destroyed.push(block.kind);
            }
            HitOutcome::Ignored => {}
        }
    }
}

/// Apply one resolved bonus effect to the session
fn apply_side_effect(state: &mut GameState, effect: SideEffect) {
    match effect {
        SideEffect::AwardScore(points) => {
            state.score += points;
        }
        SideEffect::GainLife => {
            state.lives += 1;
        }
        SideEffect::SpawnBall => {
            state.spawn_ball_at_paddle();
        }
        SideEffect::Timed { kind, factor } => {
            let duration = state.config.bonus.effect_duration_ticks;
            let (_, replaced) = state.effects.activate(kind, factor, state.time_ticks, duration);
            if let Some(old) = replaced {
                log::debug!(
                    "{:?} re-activated: factor {} -> {}, deadline reset",
                    kind,
                    old.factor,
                    factor
                );
            }
            let bounds_width = state.config.bounds.width;
            let paddle = &mut state.paddle;
            match kind {
                EffectKind::PaddleSpeed => paddle.speed = paddle.default_speed * factor,
                EffectKind::PaddleWidth => {
                    paddle.set_width(paddle.default_width * factor, bounds_width)
                }
            }
        }
        SideEffect::ScaleBallSpeed(factor) => {
            let (min, max) = (state.config.ball.min_speed, state.config.ball.max_speed);
            for ball in &mut state.balls {
                let speed = (ball.speed * factor).clamp(min, max);
                ball.set_speed(speed);
            }
        }
    }
}

/// Revert paddle stats whose effect deadline has been reached
fn expire_effects(state: &mut GameState) {
    let bounds_width = state.config.bounds.width;
    for effect in state.effects.drain_expired(state.time_ticks) {
        let paddle = &mut state.paddle;
        match effect.kind {
            EffectKind::PaddleSpeed => paddle.speed = paddle.default_speed,
            EffectKind::PaddleWidth => paddle.set_width(paddle.default_width, bounds_width),
        }
        log::debug!("{:?} expired at tick {}", effect.kind, state.time_ticks);
        state.events.push(GameEvent::EffectExpired { kind: effect.kind });
    }
}

/// Steer under the lowest ball, with a dead zone of one paddle step
fn autopilot_direction(state: &GameState) -> Direction {
    let Some(target) = state
        .balls
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|ball| ball.pos.x)
    else {
        return Direction::None;
    };

    let offset = target - state.paddle.center_x();
    if offset > state.paddle.speed {
        Direction::Right
    } else if offset < -state.paddle.speed {
        Direction::Left
    } else {
        Direction::None
    }
}
