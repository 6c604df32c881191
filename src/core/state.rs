//! Owned game state.
//!
//! ## GameState
//!
//! The single source of truth the UI renders: four tokens per color plus
//! per-color progress flags. Created once at match start and alive for
//! the whole match; there is no persistence.
//!
//! ## TurnState
//!
//! The roll/turn pointer state, reset at the start of every turn.
//!
//! ## Event
//!
//! Append-only records of everything that happened, consumed by the
//! rendering layer for highlighting, sound and animation cues.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::{Color, ColorMap, COLOR_COUNT};
use super::dice::{DieId, DieRoll};
use super::token::{Token, TokenId, GOAL, HOME, PIECE_COUNT};

/// Per-color progress flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Set permanently the first time this color captures any opponent
    /// token. Gates the Master-mode finishing lock.
    pub has_captured: bool,
}

/// Token positions and progress for all four colors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    tokens: ColorMap<[Token; PIECE_COUNT]>,
    progress: ColorMap<PlayerProgress>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create the match-start state: all tokens at home, no captures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: ColorMap::new(|_| {
                [0, 1, 2, 3].map(|i| Token::at_home(TokenId::new(i)))
            }),
            progress: ColorMap::with_default(),
        }
    }

    /// All four tokens of a color.
    #[must_use]
    pub fn tokens(&self, color: Color) -> &[Token; PIECE_COUNT] {
        &self.tokens[color]
    }

    /// One token by owner and id.
    #[must_use]
    pub fn token(&self, color: Color, id: TokenId) -> Token {
        self.tokens[color][id.index()]
    }

    /// Progress flags for a color.
    #[must_use]
    pub fn progress(&self, color: Color) -> PlayerProgress {
        self.progress[color]
    }

    /// Place a token at an explicit step position.
    ///
    /// Used by move execution and by scenario setup in tests.
    pub fn set_steps(&mut self, color: Color, id: TokenId, steps: i8) {
        debug_assert!((HOME..=GOAL).contains(&steps));
        self.tokens[color][id.index()].steps = steps;
    }

    /// Send a token back home (captured).
    pub fn send_home(&mut self, color: Color, id: TokenId) {
        self.tokens[color][id.index()].steps = HOME;
    }

    /// Record that a color has captured; the flag never clears.
    pub fn record_capture(&mut self, color: Color) {
        self.progress[color].has_captured = true;
    }

    /// Ids of a color's tokens sitting at an exact relative step.
    #[must_use]
    pub fn ids_at(&self, color: Color, steps: i8) -> SmallVec<[TokenId; PIECE_COUNT]> {
        self.tokens[color]
            .iter()
            .filter(|t| t.steps == steps)
            .map(|t| t.id)
            .collect()
    }

    /// Number of a color's tokens that have reached the goal.
    #[must_use]
    pub fn finished_count(&self, color: Color) -> usize {
        self.tokens[color].iter().filter(|t| t.is_finished()).count()
    }
}

/// Roll and turn-pointer state, reset every turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pointer: u8,

    /// May the active color roll right now?
    pub can_roll: bool,

    /// Is a roll animation pending resolution?
    pub rolling: bool,

    /// Sixes rolled back-to-back in this turn; 3 forfeits the turn.
    pub consecutive_sixes: u8,

    /// Currently selected queued die, if any.
    pub selected: Option<DieId>,

    /// Set when a triple six has forfeited the turn; blocks further
    /// intents until the scheduled turn advance fires.
    pub forfeited: bool,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnState {
    /// Turn state at match start: green to move, free to roll.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pointer: 0,
            can_roll: true,
            rolling: false,
            consecutive_sixes: 0,
            selected: None,
            forfeited: false,
        }
    }

    /// The color whose turn it is.
    #[must_use]
    pub fn active_color(&self) -> Color {
        Color::from_index(self.pointer as usize)
    }

    /// Pass the turn to the next color, resetting all per-turn state.
    pub fn advance(&mut self) {
        self.pointer = (self.pointer + 1) % COLOR_COUNT as u8;
        self.can_roll = true;
        self.rolling = false;
        self.consecutive_sixes = 0;
        self.selected = None;
        self.forfeited = false;
    }
}

/// Summary of a completed turn, kept for the dice panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    /// Whose turn it was.
    pub color: Color,

    /// Faces rolled during the turn, in roll order.
    pub faces: SmallVec<[u8; 4]>,
}

/// One entry in the append-only match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A roll animation finished and produced a die.
    RollResolved { color: Color, die: DieRoll },

    /// Third consecutive six; the queue is about to be discarded.
    TurnForfeited { color: Color },

    /// A queued die had no legal move for anyone and was dropped.
    DieDiscarded { color: Color, die: DieRoll },

    /// A token (or doubled pair) moved.
    Moved {
        color: Color,
        token: TokenId,
        from: i8,
        to: i8,
        paired: bool,
    },

    /// An opposing token was sent home.
    Captured {
        by: Color,
        victim: Color,
        token: TokenId,
        cell: u8,
    },

    /// The turn passed to the next color.
    TurnAdvanced { from: Color, to: Color },
}
