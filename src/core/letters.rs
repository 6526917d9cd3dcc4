//! Letter domain: vowels, consonants, and the weighted frequency table.
//!
//! Grids guarantee one uniformly random vowel; every other tile is drawn
//! from the 21 consonants with probability proportional to a fixed integer
//! weight. The table is static for the life of the process - it is built
//! once at configuration time and never mutated.

use serde::{Deserialize, Serialize};

use super::rng::EngineRng;

/// The five vowels a grid guarantees at least one of.
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// The 21 non-vowel letters eligible for weighted tile fill.
pub const CONSONANTS: [char; 21] = [
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'X', 'Y', 'Z',
];

/// Check whether an uppercase ASCII letter is a vowel.
#[must_use]
pub fn is_vowel(letter: char) -> bool {
    VOWELS.contains(&letter.to_ascii_uppercase())
}

/// Fixed mapping from each consonant to a positive integer weight.
///
/// Selection probability for a letter is its weight divided by the total
/// weight. The default table is shaped after English letter frequency so
/// grids skew towards playable combinations.
///
/// ## Example
///
/// ```
/// use wordgrid::core::{EngineRng, FrequencyTable};
///
/// let table = FrequencyTable::english();
/// let mut rng = EngineRng::new(42);
/// let letter = table.sample(&mut rng);
/// assert!(letter.is_ascii_uppercase());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    weights: [u32; 21],
}

impl FrequencyTable {
    /// Build a table from explicit `(letter, weight)` pairs.
    ///
    /// The pairs must cover exactly the 21 consonants, each with a nonzero
    /// weight. Order does not matter.
    #[must_use]
    pub fn new(pairs: &[(char, u32)]) -> Self {
        assert_eq!(pairs.len(), CONSONANTS.len(), "Table must cover all 21 consonants");

        let mut weights = [0u32; 21];
        for &(letter, weight) in pairs {
            let letter = letter.to_ascii_uppercase();
            let slot = CONSONANTS
                .iter()
                .position(|&c| c == letter)
                .unwrap_or_else(|| panic!("Not a consonant: {letter}"));
            assert!(weight > 0, "Zero weight for {letter}");
            assert_eq!(weights[slot], 0, "Duplicate entry for {letter}");
            weights[slot] = weight;
        }

        Self { weights }
    }

    /// The default English-frequency-shaped table.
    #[must_use]
    pub fn english() -> Self {
        Self::new(&[
            ('B', 15),
            ('C', 28),
            ('D', 43),
            ('F', 22),
            ('G', 20),
            ('H', 61),
            ('J', 2),
            ('K', 8),
            ('L', 40),
            ('M', 24),
            ('N', 67),
            ('P', 19),
            ('Q', 1),
            ('R', 60),
            ('S', 63),
            ('T', 91),
            ('V', 10),
            ('W', 24),
            ('X', 2),
            ('Y', 20),
            ('Z', 1),
        ])
    }

    /// Get the weight for a letter, `None` for vowels and non-letters.
    #[must_use]
    pub fn weight(&self, letter: char) -> Option<u32> {
        let letter = letter.to_ascii_uppercase();
        CONSONANTS
            .iter()
            .position(|&c| c == letter)
            .map(|slot| self.weights[slot])
    }

    /// Total weight across all consonants.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| u64::from(w)).sum()
    }

    /// Draw one consonant with probability proportional to its weight.
    pub fn sample(&self, rng: &mut EngineRng) -> char {
        // Construction guarantees a nonzero total, so the draw cannot fail.
        let slot = rng
            .choose_weighted(&self.weights)
            .unwrap_or(CONSONANTS.len() - 1);
        CONSONANTS[slot]
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::english()
    }
}
