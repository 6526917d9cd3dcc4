//! Engine configuration and construction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineRng, FrequencyTable, Grid};
use crate::diag::{Diagnostics, NoopDiagnostics};
use crate::round::{Countdown, RoundState};
use crate::store::{MemoryStore, ProfileStore};
use crate::validate::{LookupPolicy, MIN_WORD_LEN};

use super::session::Engine;

/// Fixed per-engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Round length in seconds.
    pub round_seconds: u32,
    /// Minimum accepted word length.
    pub min_word_len: usize,
    /// What to do when a dictionary lookup cannot be completed.
    pub policy: LookupPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            round_seconds: 60,
            min_word_len: MIN_WORD_LEN,
            policy: LookupPolicy::default(),
        }
    }
}

/// Builder for an [`Engine`].
///
/// ## Example
///
/// ```
/// use wordgrid::engine::Engine;
/// use wordgrid::validate::LookupPolicy;
///
/// let engine = Engine::builder()
///     .round_seconds(90)
///     .policy(LookupPolicy::FailClosed)
///     .seed(42)
///     .build();
/// assert_eq!(engine.time_remaining(), 0); // no round started yet
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    table: FrequencyTable,
    seed: Option<u64>,
    store: Option<Box<dyn ProfileStore>>,
    diag: Option<Arc<dyn Diagnostics>>,
}

impl EngineBuilder {
    /// Start from the defaults: 60-second rounds, 3-letter minimum,
    /// fail-open lookups, English table, entropy seed, in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            table: FrequencyTable::english(),
            seed: None,
            store: None,
            diag: None,
        }
    }

    /// Set the round length in seconds.
    #[must_use]
    pub fn round_seconds(mut self, seconds: u32) -> Self {
        assert!(seconds > 0, "Round length must be positive");
        self.config.round_seconds = seconds;
        self
    }

    /// Set the minimum accepted word length.
    #[must_use]
    pub fn min_word_len(mut self, len: usize) -> Self {
        assert!(len > 0, "Minimum word length must be positive");
        self.config.min_word_len = len;
        self
    }

    /// Set the lookup-failure policy.
    #[must_use]
    pub fn policy(mut self, policy: LookupPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Use a custom letter frequency table.
    #[must_use]
    pub fn table(mut self, table: FrequencyTable) -> Self {
        self.table = table;
        self
    }

    /// Pin the RNG seed for reproducible grids.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a custom profile store.
    #[must_use]
    pub fn store(mut self, store: impl ProfileStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Use a custom diagnostics observer.
    #[must_use]
    pub fn diagnostics(mut self, diag: impl Diagnostics + 'static) -> Self {
        self.diag = Some(Arc::new(diag));
        self
    }

    /// Build the engine.
    ///
    /// Loads the persisted high score (malformed state reads as 0) and
    /// generates an initial grid for display; the first round still
    /// generates its own.
    #[must_use]
    pub fn build(self) -> Engine {
        let store = self
            .store
            .unwrap_or_else(|| Box::new(MemoryStore::new()));
        let diag = self
            .diag
            .unwrap_or_else(|| Arc::new(NoopDiagnostics));
        let mut rng = self.seed.map_or_else(EngineRng::from_entropy, EngineRng::new);
        let grid = Grid::generate(&mut rng, &self.table);
        let high_score = store.load().high_score;

        Engine {
            config: self.config,
            table: self.table,
            rng,
            grid,
            round: RoundState::idle(),
            timer: Countdown::new(),
            compose: SmallVec::new(),
            pending: None,
            high_score,
            store,
            diag,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
