//! The game session engine.
//!
//! One `Engine` instance owns everything a session needs: configuration,
//! the frequency table, the RNG, the current grid, round state, the
//! countdown registration, the tile-composition buffer, the pending
//! lookup slot, the cached high score, and the profile store. Nothing is
//! ambient; the input and presentation layers hold a reference to the
//! engine and drive it through the methods here.
//!
//! ## Submission is two-phase
//!
//! `submit` applies the local rules and, when they pass, parks the word
//! and hands back the lowercase query for the dictionary. The embedding
//! layer performs the lookup however it likes and reports the answer to
//! `resolve_lookup`. While a word is parked, further submissions are
//! rejected - at most one validation is in flight at a time.
//! `submit_checked` drives both phases through a `Dictionary` in one call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineRng, FrequencyTable, Grid, GRID_SIZE};
use crate::diag::Diagnostics;
use crate::dict::{Dictionary, Lookup};
use crate::round::{Countdown, RoundPhase, RoundState, RoundSummary, TimerHandle};
use crate::store::ProfileStore;
use crate::validate::{self, LookupPolicy, Rejection};

use super::builder::{EngineBuilder, EngineConfig};

/// A word that passed rules 1-4 and is waiting on its dictionary answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct PendingLookup {
    /// The normalized (uppercase) word.
    pub(super) word: String,
    /// Failed lookups so far, for the retry policy.
    pub(super) attempts: u32,
}

/// Result of a submission step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The word was accepted and scored.
    Accepted {
        /// The accepted word, uppercase.
        word: String,
        /// Points awarded (the word's letter count).
        points: u32,
        /// Round score after the award.
        score: u32,
    },
    /// The word was turned down.
    Rejected(Rejection),
    /// Rules 1-4 passed; ask the dictionary about `query` and report the
    /// answer to `resolve_lookup`.
    AwaitingLookup {
        /// Lowercase form to hand to the dictionary.
        query: String,
    },
}

/// Result of one countdown tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock moved; the round continues.
    Ticked {
        /// Seconds now remaining.
        remaining: u32,
    },
    /// The clock hit zero; the round is over.
    Expired(RoundSummary),
    /// The handle belongs to a cancelled or superseded countdown; nothing
    /// happened.
    Stale,
}

/// Live feedback on an in-progress composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feasibility {
    /// The letters typed so far can still be drawn from the grid.
    Feasible,
    /// Some letter is already over-drawn; no completion can succeed.
    Unsatisfiable,
}

/// The game session engine. See the module docs.
pub struct Engine {
    pub(super) config: EngineConfig,
    pub(super) table: FrequencyTable,
    pub(super) rng: EngineRng,
    pub(super) grid: Grid,
    pub(super) round: RoundState,
    pub(super) timer: Countdown,
    pub(super) compose: SmallVec<[char; GRID_SIZE]>,
    pub(super) pending: Option<PendingLookup>,
    pub(super) high_score: u32,
    pub(super) store: Box<dyn ProfileStore>,
    pub(super) diag: Arc<dyn Diagnostics>,
}

impl Engine {
    /// Start configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    // === Round lifecycle ===

    /// Start a round, from any phase.
    ///
    /// Cancels any live countdown before acquiring a new one, resets the
    /// score and clock, clears the used words, the composition buffer and
    /// any pending lookup, and generates a fresh grid. Returns the handle
    /// the embedding layer must pass back on every tick; handles from
    /// earlier rounds are stale from this point on.
    pub fn start_round(&mut self) -> TimerHandle {
        self.timer.cancel();
        self.pending = None;
        self.compose.clear();
        self.grid = Grid::generate(&mut self.rng, &self.table);
        self.round = RoundState::begin(self.config.round_seconds);
        self.timer.start()
    }

    /// Advance the clock by one second.
    ///
    /// Ticks carrying a stale handle are ignored, so a superseded timer
    /// can keep firing harmlessly. On expiry the countdown is cancelled,
    /// input is disabled, and the summary is returned; if the final score
    /// beats the stored high score, the profile is updated and persisted
    /// (write failure is reported to diagnostics, never fatal).
    pub fn tick(&mut self, handle: TimerHandle) -> TickOutcome {
        if !self.timer.accepts(handle) || self.round.phase != RoundPhase::Running {
            return TickOutcome::Stale;
        }

        self.round.time_remaining -= 1;
        if self.round.time_remaining > 0 {
            return TickOutcome::Ticked {
                remaining: self.round.time_remaining,
            };
        }

        self.expire()
    }

    fn expire(&mut self) -> TickOutcome {
        self.timer.cancel();
        self.round.phase = RoundPhase::Expired;
        self.pending = None;
        self.compose.clear();

        let final_score = self.round.score;
        let new_high = final_score > self.high_score;
        if new_high {
            self.high_score = final_score;
            // Re-read before writing so an unrelated field (theme) set by
            // the surrounding application survives the update.
            let mut profile = self.store.load();
            profile.high_score = final_score;
            if let Err(error) = self.store.save(&profile) {
                self.diag.persist_failed(&error);
            }
        }

        TickOutcome::Expired(self.round.summary(new_high, self.high_score))
    }

    /// Replace the grid without touching round state.
    ///
    /// Round start does this itself; this entry point exists for hosts
    /// that offer a manual reshuffle outside a round.
    pub fn regenerate_grid(&mut self) -> &Grid {
        self.grid = Grid::generate(&mut self.rng, &self.table);
        &self.grid
    }

    // === Submission ===

    /// Phase one of a submission: apply rules 1-4.
    ///
    /// On success the word is parked and `AwaitingLookup` carries the
    /// lowercase dictionary query. Rejected outright when the round is
    /// not running or another lookup is still in flight.
    pub fn submit(&mut self, word: &str) -> SubmitOutcome {
        if self.round.phase != RoundPhase::Running {
            return SubmitOutcome::Rejected(Rejection::RoundNotRunning);
        }
        if self.pending.is_some() {
            return SubmitOutcome::Rejected(Rejection::LookupInFlight);
        }

        match validate::precheck(word, &self.grid, self.round.used(), self.config.min_word_len) {
            Err(rejection) => SubmitOutcome::Rejected(rejection),
            Ok(normalized) => {
                let query = normalized.to_ascii_lowercase();
                self.pending = Some(PendingLookup {
                    word: normalized,
                    attempts: 0,
                });
                SubmitOutcome::AwaitingLookup { query }
            }
        }
    }

    /// Phase two of a submission: deliver the dictionary's answer.
    ///
    /// `Unknown` resolves per the configured policy: fail-open accepts,
    /// fail-closed rejects, retry re-parks the word and asks again until
    /// its budget runs out. A lookup that outlives its round resolves to
    /// `RoundNotRunning` and the parked word is dropped.
    pub fn resolve_lookup(&mut self, lookup: Lookup) -> SubmitOutcome {
        if self.round.phase != RoundPhase::Running {
            self.pending = None;
            return SubmitOutcome::Rejected(Rejection::RoundNotRunning);
        }
        let Some(mut pending) = self.pending.take() else {
            return SubmitOutcome::Rejected(Rejection::NoLookupPending);
        };

        match lookup {
            Lookup::Found => self.accept(pending.word),
            Lookup::NotFound => SubmitOutcome::Rejected(Rejection::NotInDictionary),
            Lookup::Unknown => {
                self.diag.lookup_failed(&pending.word);
                match self.config.policy {
                    LookupPolicy::FailOpen => self.accept(pending.word),
                    LookupPolicy::FailClosed => {
                        SubmitOutcome::Rejected(Rejection::LookupFailed)
                    }
                    LookupPolicy::Retry { attempts } => {
                        pending.attempts += 1;
                        if pending.attempts > attempts {
                            return SubmitOutcome::Rejected(Rejection::LookupFailed);
                        }
                        let query = pending.word.to_ascii_lowercase();
                        self.pending = Some(pending);
                        SubmitOutcome::AwaitingLookup { query }
                    }
                }
            }
        }
    }

    /// Submit a word and drive its lookup (including retries) through
    /// `dictionary` in one call.
    pub fn submit_checked(&mut self, word: &str, dictionary: &dyn Dictionary) -> SubmitOutcome {
        let mut outcome = self.submit(word);
        while let SubmitOutcome::AwaitingLookup { query } = outcome {
            outcome = self.resolve_lookup(dictionary.lookup(&query));
        }
        outcome
    }

    fn accept(&mut self, word: String) -> SubmitOutcome {
        let seconds_remaining = self.round.time_remaining;
        let score = self.round.accept(word.clone(), seconds_remaining);
        let points = word.len() as u32;
        SubmitOutcome::Accepted {
            word,
            points,
            score,
        }
    }

    // === Composition (tile clicks) ===

    /// Append a clicked tile to the in-progress candidate and report
    /// whether the buffer is still buildable from the grid.
    ///
    /// Only the availability rule runs here; the full rule set applies
    /// when the composition is submitted.
    pub fn push_letter(&mut self, letter: char) -> Feasibility {
        self.compose.push(letter.to_ascii_uppercase());
        self.composition_feasibility()
    }

    /// Remove the most recent tile, if any.
    pub fn pop_letter(&mut self) -> Option<char> {
        self.compose.pop()
    }

    /// Discard the in-progress candidate.
    pub fn clear_composition(&mut self) {
        self.compose.clear();
    }

    /// The in-progress candidate as typed so far.
    #[must_use]
    pub fn composition(&self) -> String {
        self.compose.iter().collect()
    }

    /// Take the in-progress candidate, leaving the buffer empty.
    ///
    /// Typically followed by `submit`.
    pub fn take_composition(&mut self) -> String {
        self.compose.drain(..).collect()
    }

    /// Rule 3 alone against the current buffer.
    #[must_use]
    pub fn composition_feasibility(&self) -> Feasibility {
        let partial: String = self.compose.iter().collect();
        if validate::feasible(&partial, &self.grid) {
            Feasibility::Feasible
        } else {
            Feasibility::Unsatisfiable
        }
    }

    // === Accessors ===

    /// The current grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    /// Score accumulated this round.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.round.score
    }

    /// Whole seconds left on the clock (0 outside a running round).
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        if self.round.phase == RoundPhase::Running {
            self.round.time_remaining
        } else {
            0
        }
    }

    /// The round state, including the accept history.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Best final score seen, including the persisted one loaded at
    /// construction.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The lowercase query of the lookup in flight, if any.
    #[must_use]
    pub fn pending_query(&self) -> Option<String> {
        self.pending
            .as_ref()
            .map(|p| p.word.to_ascii_lowercase())
    }

    /// Handle of the live countdown, if one is active.
    #[must_use]
    pub fn current_handle(&self) -> Option<TimerHandle> {
        self.timer.current_handle()
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
