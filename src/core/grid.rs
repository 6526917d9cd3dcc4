//! The 16-letter grid and its letter multiset.
//!
//! ## Generation invariants
//!
//! - Exactly 16 uppercase letters.
//! - One slot, chosen uniformly among the 16, holds a vowel chosen
//!   uniformly from the five vowels.
//! - Every other slot is filled independently by weighted selection over
//!   the 21 consonants. Repeats are allowed and expected.
//!
//! A grid is a value: generating a fresh one replaces the engine's current
//! grid but never touches round state on its own.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::letters::{is_vowel, FrequencyTable, VOWELS};
use super::rng::EngineRng;

/// Number of tiles in a grid.
pub const GRID_SIZE: usize = 16;

/// The fixed letter pool available for word construction in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    tiles: [char; GRID_SIZE],
}

impl Grid {
    /// Generate a fresh grid.
    ///
    /// One uniformly chosen slot receives a uniformly chosen vowel; the
    /// remaining slots are weighted consonant draws.
    #[must_use]
    pub fn generate(rng: &mut EngineRng, table: &FrequencyTable) -> Self {
        let vowel_slot = rng.gen_range_usize(0..GRID_SIZE);
        // VOWELS is non-empty, so choose cannot fail.
        let vowel = *rng.choose(&VOWELS).unwrap_or(&'E');

        let mut tiles = ['A'; GRID_SIZE];
        for (i, tile) in tiles.iter_mut().enumerate() {
            *tile = if i == vowel_slot {
                vowel
            } else {
                table.sample(rng)
            };
        }

        Self { tiles }
    }

    /// Build a grid from explicit tiles.
    ///
    /// Tiles are uppercased; every tile must be an ASCII letter.
    #[must_use]
    pub fn from_tiles(tiles: [char; GRID_SIZE]) -> Self {
        let mut normalized = ['A'; GRID_SIZE];
        for (slot, tile) in normalized.iter_mut().zip(tiles) {
            assert!(tile.is_ascii_alphabetic(), "Not a letter: {tile:?}");
            *slot = tile.to_ascii_uppercase();
        }
        Self { tiles: normalized }
    }

    /// The tiles in order.
    #[must_use]
    pub fn tiles(&self) -> &[char; GRID_SIZE] {
        &self.tiles
    }

    /// Iterate over the tiles in order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.tiles.iter().copied()
    }

    /// Whether any tile is a vowel. True for every generated grid.
    #[must_use]
    pub fn has_vowel(&self) -> bool {
        self.tiles.iter().any(|&t| is_vowel(t))
    }

    /// Letter -> count multiset of the 16 tiles.
    #[must_use]
    pub fn counts(&self) -> LetterCounts {
        LetterCounts::from_letters(self.iter())
    }
}

impl std::fmt::Display for Grid {
    /// Renders the grid as four rows of four letters.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.tiles.chunks(4).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, tile) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{tile}")?;
            }
        }
        Ok(())
    }
}

/// A letter -> count multiset.
///
/// Used for the availability test: a word is buildable from a grid iff the
/// word's counts are a subset of the grid's counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterCounts {
    counts: FxHashMap<char, u8>,
}

impl LetterCounts {
    /// Build counts from uppercase letters.
    #[must_use]
    pub fn from_letters(letters: impl Iterator<Item = char>) -> Self {
        let mut counts = FxHashMap::default();
        for letter in letters {
            *counts.entry(letter).or_insert(0u8) += 1;
        }
        Self { counts }
    }

    /// Count for a single letter (0 if absent).
    #[must_use]
    pub fn count(&self, letter: char) -> u8 {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Number of distinct letters present.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Multiset-subset test: can `word` be drawn from these counts without
    /// exceeding, per distinct letter, the available count?
    ///
    /// `word` must already be uppercase.
    #[must_use]
    pub fn covers(&self, word: &str) -> bool {
        let needed = LetterCounts::from_letters(word.chars());
        needed
            .counts
            .iter()
            .all(|(&letter, &need)| need <= self.count(letter))
    }
}
