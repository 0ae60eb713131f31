//! Collision detection and response for axis-aligned geometry
//!
//! Everything here is deliberately simple: the ball is tested by its bounding
//! square, and every response is a single-axis velocity sign flip. There is no
//! penetration resolution, so a ball may overlap a wall by up to one tick of
//! travel before it turns around.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (origin is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Bounce one velocity component off a pair of parallel walls
///
/// The leading edge is `position + radius` when moving toward `max` and
/// `position - radius` when moving toward `min`. Position is left untouched.
#[inline]
pub fn reflect_off_bound(position: f32, velocity: f32, min: f32, max: f32, radius: f32) -> f32 {
    if velocity > 0.0 && position + radius > max {
        -velocity
    } else if velocity < 0.0 && position - radius < min {
        -velocity
    } else {
        velocity
    }
}

/// True when the ball's bounding square overlaps the rectangle
///
/// Not a true circle/rectangle distance test: corners count as hits.
#[inline]
pub fn intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.left()
        && center.x - radius < rect.right()
        && center.y + radius > rect.top()
        && center.y - radius < rect.bottom()
}

/// True when the ball's bottom edge has reached the paddle's top edge while its
/// center is within the paddle's horizontal span
#[inline]
pub fn paddle_hit(center: Vec2, radius: f32, paddle: &Rect) -> bool {
    center.y + radius >= paddle.top() && center.x >= paddle.left() && center.x <= paddle.right()
}

/// True once the ball has fully dropped past the floor
#[inline]
pub fn ball_lost(center: Vec2, radius: f32, floor: f32) -> bool {
    center.y - radius > floor
}
