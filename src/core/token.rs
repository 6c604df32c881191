//! Tokens and step positions.
//!
//! Each color owns exactly four tokens for the whole match. Tokens are
//! never created or destroyed, only repositioned; a capture resets a
//! token's steps to [`HOME`].
//!
//! ## Step encoding
//!
//! `steps` is the token's progress relative to its owner's ring offset:
//! - `-1` ([`HOME`]): not yet entered
//! - `0..=50`: on the shared 52-cell ring
//! - `51..=55`: the owner's private home stretch
//! - `56` ([`GOAL`]): finished
//!
//! Under the Master-mode finishing lock a token may also sit at relative
//! step 51 on the open ring (see `rules::legal`).

use serde::{Deserialize, Serialize};

/// Tokens per color.
pub const PIECE_COUNT: usize = 4;

/// Step value for a token still at home (not yet entered).
pub const HOME: i8 = -1;

/// Last relative step on the shared ring before the home stretch.
pub const RING_END: i8 = 50;

/// First step of the private home stretch.
pub const STRETCH_START: i8 = 51;

/// Step value for a finished token.
pub const GOAL: i8 = 56;

/// Token identifier, stable for the whole match.
///
/// Indices are 0-based within the owning color: `TokenId(0)..TokenId(3)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl TokenId {
    /// Create a new token ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw token index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all token IDs of one color.
    pub fn all() -> impl Iterator<Item = TokenId> {
        (0..PIECE_COUNT as u8).map(TokenId)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {}", self.0)
    }
}

/// A single token: stable identity plus relative step position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Identity within the owning color.
    pub id: TokenId,

    /// Relative progress; see the module docs for the encoding.
    pub steps: i8,
}

impl Token {
    /// Create a token at home.
    #[must_use]
    pub const fn at_home(id: TokenId) -> Self {
        Self { id, steps: HOME }
    }

    /// Is this token still at home?
    #[must_use]
    pub const fn is_home(self) -> bool {
        self.steps == HOME
    }

    /// Has this token reached the goal?
    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.steps >= GOAL
    }

    /// Is this token on the open ring, given the owner's ring limit
    /// (50 normally, 51 under the Master-mode lock)?
    #[must_use]
    pub const fn on_ring(self, ring_limit: i8) -> bool {
        self.steps >= 0 && self.steps <= ring_limit
    }
}
