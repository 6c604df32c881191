//! Move legality and move planning.
//!
//! [`Rules::is_valid_move`] is the central predicate of the engine. It is
//! evaluated against the live [`GameState`] for every (token, die) pair
//! whenever state changes, never cached. Each check below is an
//! independent veto, applied in order:
//!
//! 1. a token at home only moves on a 6
//! 2. the target step may not pass the goal (except under the
//!    Master-mode lock, where it wraps back onto the ring)
//! 3. a doubled pair off a safe spot only moves together, on an even die,
//!    at half value; on a safe spot it prefers to split
//! 4. doubled pairs on intermediate non-safe cells block passage for
//!    everyone except their teammates
//! 5. a lone token may never land on (capture) an opponent doubled pair
//! 6. a Master-locked color may not cross step 50; such moves wrap
//! 7. the landing cell may not already hold two of the owner's tokens
//!
//! [`Rules::plan_move`] re-derives the concrete displacement (single vs.
//! paired) and landing step that execution applies.

use smallvec::{smallvec, SmallVec};

use crate::board;
use crate::core::{
    Color, GameState, TokenId, GOAL, HOME, PIECE_COUNT, RING_END, STRETCH_START,
};

use super::{relationship, GameMode, GameResult, Relationship};

/// A concrete, validated move: which tokens shift to which step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePlan {
    /// Moving token(s); two entries for a pair move.
    pub movers: SmallVec<[TokenId; 2]>,

    /// Source step (may be [`HOME`]).
    pub from: i8,

    /// Landing step, wrap already applied.
    pub to: i8,

    /// Both members of a doubled pair move together.
    pub paired: bool,
}

/// The rule set: mode plus team toggle, stateless over [`GameState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    pub mode: GameMode,
    pub teams: bool,
}

impl Rules {
    /// Create a rule set.
    #[must_use]
    pub fn new(mode: GameMode, teams: bool) -> Self {
        Self { mode, teams }
    }

    /// Classify two colors under this rule set's team toggle.
    #[must_use]
    pub fn relationship(&self, a: Color, b: Color) -> Relationship {
        relationship(a, b, self.teams)
    }

    /// Is this color under the Master-mode finishing lock?
    #[must_use]
    pub fn locked(&self, state: &GameState, color: Color) -> bool {
        self.mode == GameMode::Master && !state.progress(color).has_captured
    }

    /// Highest relative step that is still on the open ring for a color.
    ///
    /// Locked colors keep circling through relative step 51.
    #[must_use]
    pub fn ring_limit(&self, state: &GameState, color: Color) -> i8 {
        if self.locked(state, color) {
            STRETCH_START
        } else {
            RING_END
        }
    }

    /// Ids of a color's tokens occupying a global ring cell.
    #[must_use]
    pub fn tokens_on_cell(
        &self,
        state: &GameState,
        color: Color,
        cell: u8,
    ) -> SmallVec<[TokenId; PIECE_COUNT]> {
        let limit = self.ring_limit(state, color);
        state
            .tokens(color)
            .iter()
            .filter(|t| t.on_ring(limit) && board::global_cell(color, t.steps) == cell)
            .map(|t| t.id)
            .collect()
    }

    /// Does `color` have a doubled pair resident on a global ring cell?
    fn pair_on_cell(&self, state: &GameState, color: Color, cell: u8) -> bool {
        self.tokens_on_cell(state, color, cell).len() >= 2
    }

    /// Landing step for a displacement, or `None` on overshoot.
    ///
    /// Locked colors wrap modulo 52 back onto the ring instead of
    /// entering the home stretch.
    fn landing(locked: bool, from: i8, delta: i8) -> Option<i8> {
        if from == HOME {
            return Some(0);
        }
        let raw = from + delta;
        if raw <= RING_END {
            Some(raw)
        } else if locked {
            Some(raw % board::RING_CELLS as i8)
        } else if raw <= GOAL {
            Some(raw)
        } else {
            None
        }
    }

    /// Validate one concrete displacement, returning the landing step.
    ///
    /// `delta` is the actual displacement: the full die value for a
    /// single move, half of it for a pair move.
    fn check_variant(
        &self,
        state: &GameState,
        owner: Color,
        from: i8,
        delta: i8,
        paired: bool,
    ) -> Option<i8> {
        let locked = self.locked(state, owner);
        let to = Self::landing(locked, from, delta)?;

        // Path blockade: a pair on an intermediate non-safe cell blocks
        // passage, whoever owns it, unless it is a teammate's. Home exit
        // spawns rather than traverses, so it is exempt.
        if from != HOME {
            for s in (from + 1)..(from + delta) {
                if !locked && s > RING_END {
                    // Private home stretch, nothing can sit in the way.
                    continue;
                }
                let cell = ((i16::from(owner.offset()) + i16::from(s)) % 52) as u8;
                if board::is_safe(cell) {
                    continue;
                }
                for c in Color::all() {
                    if self.relationship(owner, c) == Relationship::Teammate {
                        continue;
                    }
                    if self.pair_on_cell(state, c, cell) {
                        return None;
                    }
                }
            }
        }

        // Landing on the open ring: a lone token may not land on an
        // opponent doubled pair off a safe spot.
        if to <= self.ring_limit(state, owner) {
            let cell = board::global_cell(owner, to);
            if !board::is_safe(cell) && !paired {
                for c in Color::all() {
                    if self.relationship(owner, c) != Relationship::Opponent {
                        continue;
                    }
                    if self.pair_on_cell(state, c, cell) {
                        return None;
                    }
                }
            }
        }

        // No triple stacking. The goal is exempt so all four tokens can
        // finish on it.
        if to != GOAL && state.ids_at(owner, to).len() >= 2 {
            return None;
        }

        Some(to)
    }

    /// Pairing context at the source step: (doubled, on a safe spot,
    /// co-located token ids).
    fn pair_context(
        &self,
        state: &GameState,
        owner: Color,
        from: i8,
    ) -> (bool, bool, SmallVec<[TokenId; PIECE_COUNT]>) {
        let limit = self.ring_limit(state, owner);
        if !(0..=limit).contains(&from) {
            return (false, false, smallvec![]);
        }
        let mates = state.ids_at(owner, from);
        let doubled = mates.len() >= 2;
        let safe = board::is_safe(board::global_cell(owner, from));
        (doubled, safe, mates)
    }

    /// Derive the concrete move a (token, die) choice would execute.
    ///
    /// Returns `None` when the move is illegal. Doubled pairs off safe
    /// spots move together at half value; on safe spots the split is
    /// preferred, falling back to the pair move when only it is in range.
    #[must_use]
    pub fn plan_move(
        &self,
        state: &GameState,
        owner: Color,
        id: TokenId,
        die_value: u8,
    ) -> Option<MovePlan> {
        if !(1..=6).contains(&die_value) {
            return None;
        }
        let token = state.token(owner, id);
        let from = token.steps;
        if token.is_finished() {
            return None;
        }
        let delta = die_value as i8;

        if token.is_home() {
            if die_value != 6 {
                return None;
            }
            let to = self.check_variant(state, owner, from, delta, false)?;
            return Some(MovePlan {
                movers: smallvec![id],
                from,
                to,
                paired: false,
            });
        }

        let (doubled, safe, mates) = self.pair_context(state, owner, from);

        if doubled && !safe {
            // Off a safe spot the pair may only move together, which
            // needs an even die; each token advances half the value.
            if die_value % 2 != 0 {
                return None;
            }
            let to = self.check_variant(state, owner, from, delta / 2, true)?;
            let partner = mates.iter().copied().find(|&m| m != id)?;
            return Some(MovePlan {
                movers: smallvec![id, partner],
                from,
                to,
                paired: true,
            });
        }

        if doubled && safe {
            // Safe spots always prefer splitting off a single token.
            if let Some(to) = self.check_variant(state, owner, from, delta, false) {
                return Some(MovePlan {
                    movers: smallvec![id],
                    from,
                    to,
                    paired: false,
                });
            }
            if die_value % 2 == 0 {
                if let Some(to) = self.check_variant(state, owner, from, delta / 2, true) {
                    let partner = mates.iter().copied().find(|&m| m != id)?;
                    return Some(MovePlan {
                        movers: smallvec![id, partner],
                        from,
                        to,
                        paired: true,
                    });
                }
            }
            return None;
        }

        let to = self.check_variant(state, owner, from, delta, false)?;
        Some(MovePlan {
            movers: smallvec![id],
            from,
            to,
            paired: false,
        })
    }

    /// May this (token, die) choice move at all?
    #[must_use]
    pub fn is_valid_move(
        &self,
        state: &GameState,
        owner: Color,
        id: TokenId,
        die_value: u8,
    ) -> bool {
        self.plan_move(state, owner, id, die_value).is_some()
    }

    /// A color's own tokens that can legally use a die value.
    #[must_use]
    pub fn legal_own_tokens(
        &self,
        state: &GameState,
        color: Color,
        die_value: u8,
    ) -> SmallVec<[TokenId; PIECE_COUNT]> {
        TokenId::all()
            .filter(|&id| self.is_valid_move(state, color, id, die_value))
            .collect()
    }

    /// Who may move for this die value: the turn-holder's own tokens,
    /// falling back to the partner's only when the turn-holder has none.
    #[must_use]
    pub fn movers_for(
        &self,
        state: &GameState,
        active: Color,
        die_value: u8,
    ) -> (Color, SmallVec<[TokenId; PIECE_COUNT]>) {
        let own = self.legal_own_tokens(state, active, die_value);
        if own.is_empty() && self.teams {
            let partner = active.partner();
            let theirs = self.legal_own_tokens(state, partner, die_value);
            if !theirs.is_empty() {
                return (partner, theirs);
            }
        }
        (active, own)
    }

    /// Has any color (or team) brought all four tokens home?
    #[must_use]
    pub fn terminal_result(&self, state: &GameState) -> Option<GameResult> {
        for color in Color::all() {
            if state.finished_count(color) == PIECE_COUNT {
                return Some(if self.teams {
                    GameResult::Winners(vec![color, color.partner()])
                } else {
                    GameResult::Winner(color)
                });
            }
        }
        None
    }
}
