//! Dice: rolls, the per-turn queue, and the weighted face pool.
//!
//! A [`DieRoll`] is an opaque unique id plus a face value in 1..=6.
//! The [`DiceQueue`] holds the active color's rolled-but-unspent dice in
//! roll order; it grows while sixes keep the roll chain alive and shrinks
//! as dice are spent or discarded.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Weighted face pool for the roller.
///
/// Faces 1..=5 appear twice each, 6 appears five times. This exact
/// weighting is part of the game's feel and must not change.
pub const FACE_POOL: [u8; 15] = [1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 6, 6, 6];

/// Unique identifier for a single die roll.
///
/// Ids are allocated monotonically by the engine and never reused within
/// a match, so a stale id from a superseded UI callback can never alias a
/// live die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DieId(pub u64);

impl std::fmt::Display for DieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Die {}", self.0)
    }
}

/// A resolved die roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    /// Unique id, consumed together with the roll.
    pub id: DieId,

    /// Face value in 1..=6.
    pub value: u8,
}

/// Ordered queue of not-yet-consumed dice for the active color.
///
/// Insertion order is roll order. Reset at the start of every turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceQueue {
    rolls: SmallVec<[DieRoll; 4]>,
}

impl DiceQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a roll at the back.
    pub fn push(&mut self, roll: DieRoll) {
        self.rolls.push(roll);
    }

    /// Look up a roll by id.
    #[must_use]
    pub fn get(&self, id: DieId) -> Option<DieRoll> {
        self.rolls.iter().copied().find(|r| r.id == id)
    }

    /// Remove a roll by id, returning it if present.
    pub fn remove(&mut self, id: DieId) -> Option<DieRoll> {
        let pos = self.rolls.iter().position(|r| r.id == id)?;
        Some(self.rolls.remove(pos))
    }

    /// The oldest queued roll, if any.
    #[must_use]
    pub fn first(&self) -> Option<DieRoll> {
        self.rolls.first().copied()
    }

    /// Number of queued rolls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    /// Is the queue empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Iterate over queued rolls in roll order.
    pub fn iter(&self) -> impl Iterator<Item = DieRoll> + '_ {
        self.rolls.iter().copied()
    }

    /// Discard all queued rolls.
    pub fn clear(&mut self) {
        self.rolls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(id: u64, value: u8) -> DieRoll {
        DieRoll { id: DieId(id), value }
    }

    #[test]
    fn test_queue_preserves_roll_order() {
        let mut q = DiceQueue::new();
        q.push(roll(0, 6));
        q.push(roll(1, 6));
        q.push(roll(2, 3));

        let values: Vec<_> = q.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![6, 6, 3]);
        assert_eq!(q.first(), Some(roll(0, 6)));
    }

    #[test]
    fn test_queue_remove_by_id() {
        let mut q = DiceQueue::new();
        q.push(roll(0, 6));
        q.push(roll(1, 4));

        assert_eq!(q.remove(DieId(0)), Some(roll(0, 6)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.first(), Some(roll(1, 4)));
        assert_eq!(q.remove(DieId(0)), None);
    }

    #[test]
    fn test_queue_get_missing() {
        let q = DiceQueue::new();
        assert_eq!(q.get(DieId(99)), None);
        assert!(q.is_empty());
    }

    #[test]
    fn test_face_pool_weighting() {
        assert_eq!(FACE_POOL.len(), 15);
        for face in 1..=5u8 {
            assert_eq!(FACE_POOL.iter().filter(|&&f| f == face).count(), 2);
        }
        assert_eq!(FACE_POOL.iter().filter(|&&f| f == 6).count(), 5);
    }

    #[test]
    fn test_queue_serialization() {
        let mut q = DiceQueue::new();
        q.push(roll(3, 5));
        let json = serde_json::to_string(&q).unwrap();
        let back: DiceQueue = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }
}
