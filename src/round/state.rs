//! Round state: phase, clock, score, and the accepted-word history.
//!
//! ## Phases
//!
//! `Idle` (before the first start) -> `Running` (timer live, input
//! accepted) -> `Expired` (terminal until the next start).
//!
//! Round data uses `im` persistent collections so snapshots and summaries
//! clone in O(1).

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Before the first round starts.
    #[default]
    Idle,
    /// Timer live, submissions accepted.
    Running,
    /// Clock hit zero; input disabled until the next start.
    Expired,
}

/// One accepted word, in submission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptRecord {
    /// The accepted word, uppercase.
    pub word: String,
    /// Points awarded (the word's letter count).
    pub points: u32,
    /// Seconds left on the clock when the word was accepted.
    pub seconds_remaining: u32,
}

/// Mutable state of one round.
///
/// Created by `begin`, mutated by submissions and ticks, replaced wholesale
/// on the next round start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Current lifecycle phase.
    pub phase: RoundPhase,
    /// Score accumulated this round.
    pub score: u32,
    /// Whole seconds left on the clock.
    pub time_remaining: u32,
    /// Words already accepted this round (uppercase, unique).
    used: ImHashSet<String>,
    /// Accepted words in submission order, for display.
    history: Vector<AcceptRecord>,
}

impl RoundState {
    /// State before the first round: Idle, zero clock, empty.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            phase: RoundPhase::Idle,
            score: 0,
            time_remaining: 0,
            used: ImHashSet::new(),
            history: Vector::new(),
        }
    }

    /// Fresh Running state with a full clock.
    #[must_use]
    pub fn begin(round_seconds: u32) -> Self {
        assert!(round_seconds > 0, "Round length must be positive");
        Self {
            phase: RoundPhase::Running,
            score: 0,
            time_remaining: round_seconds,
            used: ImHashSet::new(),
            history: Vector::new(),
        }
    }

    /// Whether a word was already accepted this round.
    ///
    /// `word` must be uppercase.
    #[must_use]
    pub fn is_used(&self, word: &str) -> bool {
        self.used.contains(word)
    }

    /// The used-word set.
    #[must_use]
    pub fn used(&self) -> &ImHashSet<String> {
        &self.used
    }

    /// Number of words accepted so far.
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.history.len()
    }

    /// Record an accepted word and return the new score.
    ///
    /// The word must be uppercase, not yet used, and is scored by letter
    /// count.
    pub fn accept(&mut self, word: String, seconds_remaining: u32) -> u32 {
        debug_assert!(!self.is_used(&word), "Word accepted twice: {word}");

        let points = word.len() as u32;
        self.score += points;
        self.used.insert(word.clone());
        self.history.push_back(AcceptRecord {
            word,
            points,
            seconds_remaining,
        });
        self.score
    }

    /// Accepted words in submission order.
    #[must_use]
    pub fn words(&self) -> Vec<String> {
        self.history.iter().map(|r| r.word.clone()).collect()
    }

    /// The full accept history in submission order.
    #[must_use]
    pub fn history(&self) -> &Vector<AcceptRecord> {
        &self.history
    }

    /// Build the end-of-round summary.
    #[must_use]
    pub fn summary(&self, new_high_score: bool, high_score: u32) -> RoundSummary {
        RoundSummary {
            final_score: self.score,
            words: self.words(),
            new_high_score,
            high_score,
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::idle()
    }
}

/// What a finished round reports to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Score at expiry.
    pub final_score: u32,
    /// Accepted words in submission order.
    pub words: Vec<String>,
    /// Whether this round beat the stored high score.
    pub new_high_score: bool,
    /// The high score after any update.
    pub high_score: u32,
}
