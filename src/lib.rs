//! # ludo-core
//!
//! The rules and turn engine for a four-player Ludo variant, built to sit
//! behind any rendering layer.
//!
//! ## Design Principles
//!
//! 1. **Engine Owns the Truth**: [`LudoEngine`] holds all match state and
//!    is the only thing that mutates it. The UI submits intents and
//!    renders what the engine reports.
//!
//! 2. **Silent Rejection**: Invalid intents are no-ops returning `false`.
//!    The UI derives legality for highlighting; illegal input is ignored,
//!    never an error.
//!
//! 3. **Caller-Driven Time**: No timers, no threads. Delayed effects are
//!    epoch-stamped follow-ups fired by [`LudoEngine::tick`]; a mutation
//!    revokes whatever was scheduled against the superseded state.
//!
//! 4. **Deterministic Replays**: Rolls come from a seeded generator that
//!    can be pre-scripted, so a match replays exactly from its intents.
//!
//! ## Coordinates
//!
//! Token positions are owner-relative step counts: `-1` home, `0..=50` on
//! the shared 52-cell ring (mapped to global cells through the owner's
//! fixed offset), `51..=55` the private home stretch, `56` the goal.
//!
//! ## Modules
//!
//! - `core`: Colors, tokens, dice, the roller, game/turn state, events
//! - `board`: Ring geometry, safe spots, home stretch mapping
//! - `rules`: Modes, teams, move legality, and the turn engine
//! - `schedule`: Revocable millisecond-clock follow-up queue

pub mod board;
pub mod core;
pub mod rules;
pub mod schedule;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap, COLOR_COUNT,
    DiceQueue, DiceRng, DieId, DieRoll, FACE_POOL,
    Event, GameState, PlayerProgress, TurnState, TurnSummary,
    Token, TokenId, GOAL, HOME, PIECE_COUNT, RING_END, STRETCH_START,
};

pub use crate::board::{HomeStretch, RING_CELLS, SAFE_CELLS};

pub use crate::rules::{
    relationship, EngineConfig, GameMode, GameResult, LudoEngine, MovePlan, Relationship, Rules,
};

pub use crate::schedule::{FollowUp, Scheduler};
