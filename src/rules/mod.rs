//! Rules: color relationships, game modes, legality, and the turn engine.
//!
//! Games are either Classic or Master mode, optionally with two-team
//! play. The teammate-aware branching used by blockade, capture and
//! legality checks is centralized in [`relationship`] so every predicate
//! classifies colors the same way.

pub mod engine;
pub mod legal;

use serde::{Deserialize, Serialize};

use crate::core::Color;

pub use engine::{EngineConfig, LudoEngine};
pub use legal::{MovePlan, Rules};

/// Rule set variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Standard rules.
    #[default]
    Classic,
    /// A color may not enter its home stretch until it has captured at
    /// least one opponent token.
    Master,
}

/// How two colors relate for rule purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    /// The same color.
    Same,
    /// Partners in two-team play.
    Teammate,
    /// Everyone else.
    Opponent,
}

/// Classify two colors.
///
/// With teams disabled every other color is an opponent. With teams
/// enabled, colors whose turn-order indices differ by exactly 2 are
/// teammates: (green, blue) and (yellow, red).
#[must_use]
pub fn relationship(a: Color, b: Color, teams: bool) -> Relationship {
    if a == b {
        Relationship::Same
    } else if teams && a.partner() == b {
        Relationship::Teammate
    } else {
        Relationship::Opponent
    }
}

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Color),
    /// Shared victory (two-team play).
    Winners(Vec<Color>),
}

impl GameResult {
    /// Check if a color won.
    #[must_use]
    pub fn is_winner(&self, color: Color) -> bool {
        match self {
            GameResult::Winner(c) => *c == color,
            GameResult::Winners(cs) => cs.contains(&color),
        }
    }
}
