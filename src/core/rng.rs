//! Deterministic die roller.
//!
//! ## Key Features
//!
//! - **Deterministic**: the same seed produces the same face sequence
//! - **Weighted**: faces are drawn from the fixed pool in
//!   [`crate::core::dice::FACE_POOL`], which biases toward 6
//! - **Scriptable**: a queue of pre-decided faces can be pushed in front
//!   of the random stream, so a whole match can be replayed from a known
//!   die sequence (and tests can force exact rolls)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::dice::FACE_POOL;

/// Deterministic, optionally scripted die roller.
///
/// Uses ChaCha8 for speed while keeping a high-quality deterministic
/// stream, seeded once per match.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
    script: Vec<u8>,
}

impl DiceRng {
    /// Create a new roller with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            script: Vec::new(),
        }
    }

    /// The seed this roller was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Append pre-decided faces to the script.
    ///
    /// Scripted faces are consumed in order before any random draw.
    /// Values outside 1..=6 are ignored.
    pub fn push_script(&mut self, faces: &[u8]) {
        self.script
            .extend(faces.iter().copied().filter(|f| (1..=6).contains(f)));
    }

    /// Number of scripted faces not yet consumed.
    #[must_use]
    pub fn script_len(&self) -> usize {
        self.script.len()
    }

    /// Roll one die face.
    ///
    /// Pops the next scripted face if one is queued, otherwise draws from
    /// the weighted pool.
    pub fn roll_face(&mut self) -> u8 {
        if !self.script.is_empty() {
            return self.script.remove(0);
        }
        FACE_POOL[self.inner.gen_range(0..FACE_POOL.len())]
    }
}
