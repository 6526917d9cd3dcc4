//! Word acceptance rules.
//!
//! Rules apply in order and short-circuit on the first failure:
//!
//! 1. minimum length (default 3);
//! 2. no repeats within a round;
//! 3. letter availability (multiset-subset test against the grid);
//! 4. at least one vowel;
//! 5. dictionary existence - applied by the engine through the lookup
//!    policy, not here.
//!
//! Rejections are ordinary outcomes, not errors: the caller surfaces them
//! as "word rejected" signals.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{is_vowel, Grid};

/// Default minimum accepted word length.
pub const MIN_WORD_LEN: usize = 3;

/// Why a submission was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// Shorter than the configured minimum.
    TooShort,
    /// Already accepted this round.
    AlreadyUsed,
    /// Needs more of some letter than the grid holds.
    LettersUnavailable,
    /// Contains no vowel.
    NoVowel,
    /// The dictionary definitively does not know the word.
    NotInDictionary,
    /// The lookup could not be completed and policy rejects on failure.
    LookupFailed,
    /// Another submission is still waiting on its dictionary lookup.
    LookupInFlight,
    /// `resolve_lookup` called with nothing pending.
    NoLookupPending,
    /// Submissions are only accepted while a round is running.
    RoundNotRunning,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Rejection::TooShort => "too short",
            Rejection::AlreadyUsed => "already used this round",
            Rejection::LettersUnavailable => "letters not available in grid",
            Rejection::NoVowel => "no vowel",
            Rejection::NotInDictionary => "not in dictionary",
            Rejection::LookupFailed => "dictionary lookup failed",
            Rejection::LookupInFlight => "a lookup is already in flight",
            Rejection::NoLookupPending => "no lookup pending",
            Rejection::RoundNotRunning => "round not running",
        };
        f.write_str(reason)
    }
}

/// Uppercase-normalize a raw candidate.
#[must_use]
pub fn normalize(word: &str) -> String {
    word.trim().to_ascii_uppercase()
}

/// Apply rules 1-4 to a candidate word.
///
/// Returns the uppercase-normalized word when all four pass; the engine
/// then applies rule 5 (dictionary existence) via the lookup policy.
pub fn precheck(
    word: &str,
    grid: &Grid,
    used: &ImHashSet<String>,
    min_len: usize,
) -> Result<String, Rejection> {
    let word = normalize(word);

    if word.chars().count() < min_len {
        return Err(Rejection::TooShort);
    }
    if used.contains(&word) {
        return Err(Rejection::AlreadyUsed);
    }
    if !grid.counts().covers(&word) {
        return Err(Rejection::LettersUnavailable);
    }
    if !word.chars().any(is_vowel) {
        return Err(Rejection::NoVowel);
    }

    Ok(word)
}

/// Rule 3 alone, for live feedback while a candidate is still being
/// composed.
///
/// Never consumes or rejects the candidate; an infeasible partial string
/// just means "not buildable from this grid as typed so far".
#[must_use]
pub fn feasible(partial: &str, grid: &Grid) -> bool {
    grid.counts().covers(&normalize(partial))
}
