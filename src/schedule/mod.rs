//! Revocable delayed follow-ups.
//!
//! The engine never blocks or spawns timers. Roll animation, auto-moves
//! and turn advances are modeled as [`FollowUp`] entries scheduled
//! against a millisecond clock the caller drives. Every entry carries the
//! epoch of the state it was scheduled against; any mutation bumps the
//! epoch, so follow-ups queued against superseded state are dropped
//! instead of firing against the wrong turn or roll.

use serde::{Deserialize, Serialize};

/// A deferred engine action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowUp {
    /// Assign a face value to the pending roll.
    ResolveRoll,

    /// Auto-select, auto-move or discard for the current die selection.
    AutoResolve,

    /// Pass the turn to the next color.
    AdvanceTurn,

    /// Discard the whole queue after a triple six, then pass the turn.
    ForfeitTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    due_at: u64,
    epoch: u64,
    seq: u64,
    follow_up: FollowUp,
}

/// Epoch-stamped timer queue.
///
/// `advance` moves the clock; `pop_due` hands back due follow-ups one at
/// a time so each can mutate state (and bump the epoch, revoking whatever
/// else was pending) before the next is considered.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now: u64,
    epoch: u64,
    next_seq: u64,
    pending: Vec<Entry>,
}

impl Scheduler {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Current state epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Invalidate everything scheduled so far.
    ///
    /// Called on every state mutation; stale entries are pruned lazily.
    pub fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    /// Schedule a follow-up `delay_ms` from now, stamped with the current
    /// epoch.
    pub fn schedule(&mut self, follow_up: FollowUp, delay_ms: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Entry {
            due_at: self.now + delay_ms,
            epoch: self.epoch,
            seq,
            follow_up,
        });
    }

    /// Advance the clock by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.now += elapsed_ms;
    }

    /// Remove and return the earliest due follow-up that is still valid.
    ///
    /// Entries from older epochs are discarded along the way. Returns
    /// `None` when nothing valid is due yet.
    pub fn pop_due(&mut self) -> Option<FollowUp> {
        self.pending.retain(|e| e.epoch == self.epoch);

        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_at <= self.now)
            .min_by_key(|(_, e)| (e.due_at, e.seq))
            .map(|(i, _)| i)?;

        Some(self.pending.remove(idx).follow_up)
    }

    /// Is anything still scheduled for the current epoch?
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.iter().any(|e| e.epoch == self.epoch)
    }

    /// Time until the next valid entry fires, if any.
    #[must_use]
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .iter()
            .filter(|e| e.epoch == self.epoch)
            .map(|e| e.due_at.saturating_sub(self.now))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_when_due() {
        let mut s = Scheduler::new();
        s.schedule(FollowUp::ResolveRoll, 500);

        assert_eq!(s.pop_due(), None);
        s.advance(499);
        assert_eq!(s.pop_due(), None);
        s.advance(1);
        assert_eq!(s.pop_due(), Some(FollowUp::ResolveRoll));
        assert_eq!(s.pop_due(), None);
    }

    #[test]
    fn test_bump_revokes_pending() {
        let mut s = Scheduler::new();
        s.schedule(FollowUp::AdvanceTurn, 100);
        s.bump_epoch();
        s.advance(1000);

        assert_eq!(s.pop_due(), None);
        assert!(!s.has_pending());
    }

    #[test]
    fn test_earliest_first() {
        let mut s = Scheduler::new();
        s.schedule(FollowUp::AdvanceTurn, 200);
        s.schedule(FollowUp::AutoResolve, 100);
        s.advance(300);

        assert_eq!(s.pop_due(), Some(FollowUp::AutoResolve));
        assert_eq!(s.pop_due(), Some(FollowUp::AdvanceTurn));
    }

    #[test]
    fn test_insertion_order_breaks_ties() {
        let mut s = Scheduler::new();
        s.schedule(FollowUp::ResolveRoll, 100);
        s.schedule(FollowUp::AutoResolve, 100);
        s.advance(100);

        assert_eq!(s.pop_due(), Some(FollowUp::ResolveRoll));
        assert_eq!(s.pop_due(), Some(FollowUp::AutoResolve));
    }

    #[test]
    fn test_next_due_in() {
        let mut s = Scheduler::new();
        assert_eq!(s.next_due_in(), None);

        s.schedule(FollowUp::ResolveRoll, 500);
        assert_eq!(s.next_due_in(), Some(500));

        s.advance(200);
        assert_eq!(s.next_due_in(), Some(300));

        s.bump_epoch();
        assert_eq!(s.next_due_in(), None);
    }
}
