//! Identity types and owned state: colors, tokens, dice, the roller, and
//! the authoritative game/turn state.

mod color;
mod dice;
mod rng;
mod state;
mod token;

pub use color::{Color, ColorMap, COLOR_COUNT};
pub use dice::{DiceQueue, DieId, DieRoll, FACE_POOL};
pub use rng::DiceRng;
pub use state::{Event, GameState, PlayerProgress, TurnState, TurnSummary};
pub use token::{Token, TokenId, GOAL, HOME, PIECE_COUNT, RING_END, STRETCH_START};
