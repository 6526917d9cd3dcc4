//! # wordgrid
//!
//! A timed word-hunt game engine: a 16-tile letter grid, a 60-second
//! round clock, and a rule pipeline deciding which submitted words score.
//!
//! ## Design Principles
//!
//! 1. **One owner**: a single [`Engine`] instance holds every piece of
//!    round data. The input and presentation layers drive it by
//!    reference; nothing lives in ambient globals.
//!
//! 2. **Event-driven**: the engine owns no clock and no network. The
//!    embedding layer delivers ticks, submissions, tile clicks, and
//!    dictionary answers as discrete calls.
//!
//! 3. **Collaborators behind traits**: the dictionary, the profile
//!    store, and diagnostics are trait objects with in-crate baselines,
//!    so the engine tests without a network or a filesystem.
//!
//! ## Architecture
//!
//! - **Deterministic RNG**: ChaCha8 behind [`core::EngineRng`]; a pinned
//!   seed reproduces a whole round, grid included.
//!
//! - **Persistent round state**: `im` collections make snapshots and
//!   end-of-round summaries O(1) clones.
//!
//! - **Two-phase submission**: local rules first, then at most one
//!   dictionary lookup in flight, resolved under a configurable
//!   fail-open / fail-closed / retry policy.
//!
//! ## Modules
//!
//! - `core`: letters, frequency table, grid, RNG
//! - `round`: round phase/state/summary, countdown ownership
//! - `validate`: acceptance rules and the lookup-failure policy
//! - `dict`: the dictionary collaborator and baselines
//! - `store`: durable profile (high score, theme) and checkpoints
//! - `diag`: diagnostics collaborator
//! - `engine`: the session engine tying it all together

pub mod core;
pub mod diag;
pub mod dict;
pub mod engine;
pub mod round;
pub mod store;
pub mod validate;

// Re-export commonly used types
pub use crate::core::{EngineRng, EngineRngState, FrequencyTable, Grid, LetterCounts, GRID_SIZE};

pub use crate::round::{AcceptRecord, Countdown, RoundPhase, RoundState, RoundSummary, TimerHandle};

pub use crate::validate::{LookupPolicy, Rejection};

pub use crate::dict::{Dictionary, Lookup, WordList};

#[cfg(feature = "http")]
pub use crate::dict::HttpDictionary;

pub use crate::store::{FileStore, MemoryStore, Profile, ProfileStore, StoreError, Theme};

pub use crate::diag::{Diagnostics, NoopDiagnostics};

pub use crate::engine::{
    Engine, EngineBuilder, EngineConfig, EngineSnapshot, Feasibility, SubmitOutcome, TickOutcome,
};
