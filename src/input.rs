//! Input latch
//!
//! Bridges edge-triggered key/touch events from an external input source to
//! the level-set `TickInput` read at the start of each tick. No queuing:
//! the last write per direction wins, and one-shot commands fire once.

use crate::sim::{Direction, TickInput};

#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    left: bool,
    right: bool,
    toggle_pause: bool,
    reset: bool,
    autopilot: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Left key/touch pressed (true) or released (false)
    pub fn set_left(&mut self, held: bool) {
        self.left = held;
    }

    pub fn set_right(&mut self, held: bool) {
        self.right = held;
    }

    pub fn request_toggle_pause(&mut self) {
        self.toggle_pause = true;
    }

    pub fn request_reset(&mut self) {
        self.reset = true;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Held direction; Right wins when both are held
    pub fn direction(&self) -> Direction {
        if self.right {
            Direction::Right
        } else if self.left {
            Direction::Left
        } else {
            Direction::None
        }
    }

    /// Input for the next tick. Clears one-shot commands, keeps held directions.
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            direction: self.direction(),
            toggle_pause: self.toggle_pause,
            reset: self.reset,
            autopilot: self.autopilot,
        };
        self.toggle_pause = false;
        self.reset = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_level_set() {
        let mut latch = InputLatch::new();
        assert_eq!(latch.direction(), Direction::None);

        latch.set_left(true);
        assert_eq!(latch.take().direction, Direction::Left);
        // Still held on the next tick
        assert_eq!(latch.take().direction, Direction::Left);

        latch.set_left(false);
        assert_eq!(latch.take().direction, Direction::None);
    }

    #[test]
    fn test_right_wins_when_both_held() {
        let mut latch = InputLatch::new();
        latch.set_left(true);
        latch.set_right(true);
        assert_eq!(latch.direction(), Direction::Right);

        latch.set_right(false);
        assert_eq!(latch.direction(), Direction::Left);
    }

    #[test]
    fn test_commands_are_one_shot() {
        let mut latch = InputLatch::new();
        latch.request_toggle_pause();
        latch.request_reset();
        // Repeated requests collapse into one
        latch.request_toggle_pause();

        let first = latch.take();
        assert!(first.toggle_pause);
        assert!(first.reset);

        let second = latch.take();
        assert!(!second.toggle_pause);
        assert!(!second.reset);
    }
}
