//! Player colors and per-color data storage.
//!
//! ## Color
//!
//! One of four fixed identities. Turn order cycles
//! green -> yellow -> blue -> red -> green.
//!
//! ## ColorMap
//!
//! Per-color data storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Color`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the four player colors.
///
/// Each color has a fixed offset into the shared 52-cell ring where its
/// relative step 0 lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Yellow,
    Blue,
    Red,
}

/// Number of colors in a match.
pub const COLOR_COUNT: usize = 4;

impl Color {
    /// Turn order, starting with the first mover.
    pub const ORDER: [Color; COLOR_COUNT] = [Color::Green, Color::Yellow, Color::Blue, Color::Red];

    /// Get the raw turn-order index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get a color from its turn-order index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ORDER[index]
    }

    /// Iterate over all colors in turn order.
    pub fn all() -> impl Iterator<Item = Color> {
        Self::ORDER.into_iter()
    }

    /// The next color in the turn cycle.
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % COLOR_COUNT)
    }

    /// This color's fixed offset into the shared 52-cell ring.
    #[must_use]
    pub const fn offset(self) -> u8 {
        match self {
            Color::Green => 0,
            Color::Yellow => 13,
            Color::Blue => 26,
            Color::Red => 39,
        }
    }

    /// The color sitting opposite, which is the partner in two-team play.
    ///
    /// Teams are pairs of turn-order indices differing by exactly 2:
    /// (green, blue) and (yellow, red).
    #[must_use]
    pub fn partner(self) -> Self {
        Self::from_index((self.index() + 2) % COLOR_COUNT)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Red => "red",
        };
        write!(f, "{name}")
    }
}

/// Per-color data storage with O(1) access.
///
/// Backed by a fixed array with one entry per color.
///
/// ## Example
///
/// ```
/// use ludo_core::core::{Color, ColorMap};
///
/// let mut scores: ColorMap<i32> = ColorMap::with_value(0);
/// scores[Color::Red] = 5;
/// assert_eq!(scores[Color::Red], 5);
/// assert_eq!(scores[Color::Green], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; COLOR_COUNT],
}

impl<T> ColorMap<T> {
    /// Create a new ColorMap with values from a factory function.
    ///
    /// The factory receives the `Color` for each entry.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ORDER.map(factory),
        }
    }

    /// Create a new ColorMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new ColorMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a color's data.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a color's data.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Color::from_index(i), v))
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
