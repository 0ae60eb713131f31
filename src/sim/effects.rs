//! Timed paddle effects
//!
//! Reversions are scheduled on the controller's own tick clock instead of
//! independent timers. At most one effect per kind is live: activating a kind
//! again cancels the pending reversion (by token) and schedules a new one, so
//! an older activation can never revert a newer one early.

use serde::{Deserialize, Serialize};

/// Which paddle stat an effect modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// Slow-paddle bonus
    PaddleSpeed,
    /// Enlarge and shrink bonuses share this slot
    PaddleWidth,
}

/// Handle identifying one scheduled reversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectToken(pub u64);

/// An active modifier and its expiry deadline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub kind: EffectKind,
    /// Multiplier applied to the stat's default value
    pub factor: f32,
    /// Tick at which the stat reverts
    pub deadline: u64,
    pub token: EffectToken,
}

/// Pending reversions, ordered by activation
#[derive(Debug, Clone, Default)]
pub struct EffectSchedule {
    active: Vec<TimedEffect>,
    next_token: u64,
}

impl EffectSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `kind` until `now + duration`, replacing any live effect of the
    /// same kind. Returns the new token and the effect it cancelled, if any.
    pub fn activate(
        &mut self,
        kind: EffectKind,
        factor: f32,
        now: u64,
        duration: u64,
    ) -> (EffectToken, Option<TimedEffect>) {
        let replaced = self.take_kind(kind);

        let token = EffectToken(self.next_token);
        self.next_token += 1;
        self.active.push(TimedEffect {
            kind,
            factor,
            deadline: now.saturating_add(duration),
            token,
        });

        (token, replaced)
    }

    /// Cancel a scheduled reversion. Stale tokens are ignored.
    pub fn cancel(&mut self, token: EffectToken) -> Option<TimedEffect> {
        let idx = self.active.iter().position(|e| e.token == token)?;
        Some(self.active.remove(idx))
    }

    /// Remove and return every effect whose deadline has been reached
    pub fn drain_expired(&mut self, now: u64) -> Vec<TimedEffect> {
        let (expired, live): (Vec<_>, Vec<_>) =
            self.active.drain(..).partition(|e| e.deadline <= now);
        self.active = live;
        expired
    }

    /// Live effect for a kind
    pub fn get(&self, kind: EffectKind) -> Option<&TimedEffect> {
        self.active.iter().find(|e| e.kind == kind)
    }

    pub fn active(&self) -> &[TimedEffect] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drop all pending reversions (session reset)
    pub fn clear(&mut self) {
        self.active.clear();
    }

    fn take_kind(&mut self, kind: EffectKind) -> Option<TimedEffect> {
        let idx = self.active.iter().position(|e| e.kind == kind)?;
        Some(self.active.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_expire() {
        let mut schedule = EffectSchedule::new();
        schedule.activate(EffectKind::PaddleWidth, 1.5, 10, 100);

        assert!(schedule.drain_expired(109).is_empty());
        let expired = schedule.drain_expired(110);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].kind, EffectKind::PaddleWidth);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_reactivation_resets_deadline_and_factor() {
        let mut schedule = EffectSchedule::new();
        let (first, _) = schedule.activate(EffectKind::PaddleWidth, 1.5, 0, 100);
        let (second, replaced) = schedule.activate(EffectKind::PaddleWidth, 0.6, 50, 100);

        assert_ne!(first, second);
        assert_eq!(replaced.map(|e| e.token), Some(first));
        assert_eq!(schedule.active().len(), 1);

        // The first deadline passes without reverting anything
        assert!(schedule.drain_expired(100).is_empty());
        let live = schedule.get(EffectKind::PaddleWidth).unwrap();
        assert_eq!(live.factor, 0.6);
        assert_eq!(live.deadline, 150);

        assert_eq!(schedule.drain_expired(150).len(), 1);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut schedule = EffectSchedule::new();
        schedule.activate(EffectKind::PaddleSpeed, 0.5, 0, 10);
        schedule.activate(EffectKind::PaddleWidth, 1.5, 5, 10);

        let expired = schedule.drain_expired(10);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].kind, EffectKind::PaddleSpeed);
        assert!(schedule.get(EffectKind::PaddleWidth).is_some());
    }

    #[test]
    fn test_cancel_stale_token() {
        let mut schedule = EffectSchedule::new();
        let (first, _) = schedule.activate(EffectKind::PaddleSpeed, 0.5, 0, 10);
        schedule.activate(EffectKind::PaddleSpeed, 0.5, 5, 10);

        assert!(schedule.cancel(first).is_none());
        assert_eq!(schedule.active().len(), 1);
    }
}
