//! Engine checkpointing.
//!
//! A snapshot captures a whole session mid-round - grid, round state,
//! composition, pending lookup, RNG position - in O(1) thanks to the
//! persistent round collections and the ChaCha word position. Encode it
//! with `store::save_checkpoint` / `store::load_checkpoint` to survive a
//! process restart.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineRng, EngineRngState, FrequencyTable, Grid, GRID_SIZE};
use crate::diag::Diagnostics;
use crate::round::{Countdown, RoundState};
use crate::store::ProfileStore;

use super::builder::EngineConfig;
use super::session::{Engine, PendingLookup};

/// A serializable capture of a whole session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    config: EngineConfig,
    table: FrequencyTable,
    rng: EngineRngState,
    grid: Grid,
    round: RoundState,
    timer: Countdown,
    compose: SmallVec<[char; GRID_SIZE]>,
    pending: Option<PendingLookup>,
    high_score: u32,
}

impl Engine {
    /// Capture the session.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            config: self.config,
            table: self.table.clone(),
            rng: self.rng.state(),
            grid: self.grid,
            round: self.round.clone(),
            timer: self.timer.clone(),
            compose: self.compose.clone(),
            pending: self.pending.clone(),
            high_score: self.high_score,
        }
    }

    /// Rebuild a session from a snapshot.
    ///
    /// The store and diagnostics collaborators are not part of a snapshot
    /// and are supplied fresh. If the store has meanwhile recorded a
    /// higher score than the snapshot knew, the stored value wins.
    #[must_use]
    pub fn resume(
        snapshot: EngineSnapshot,
        store: Box<dyn ProfileStore>,
        diag: Arc<dyn Diagnostics>,
    ) -> Self {
        let stored = store.load().high_score;
        Engine {
            config: snapshot.config,
            table: snapshot.table,
            rng: EngineRng::from_state(&snapshot.rng),
            grid: snapshot.grid,
            round: snapshot.round,
            timer: snapshot.timer,
            compose: snapshot.compose,
            pending: snapshot.pending,
            high_score: snapshot.high_score.max(stored),
            store,
            diag,
        }
    }
}
