//! Core letter-domain types: the frequency table, the grid, and the RNG.
//!
//! These are the pure building blocks. Round lifecycle and validation sit
//! on top in `round`, `validate`, and `engine`.

pub mod grid;
pub mod letters;
pub mod rng;

pub use grid::{Grid, LetterCounts, GRID_SIZE};
pub use letters::{is_vowel, FrequencyTable, CONSONANTS, VOWELS};
pub use rng::{EngineRng, EngineRngState};
