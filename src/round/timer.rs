//! Countdown ownership: at most one live timer per engine.
//!
//! Each round owns at most one active countdown. Starting a new round
//! invalidates every handle issued before it (generation bump), so a stray
//! tick from a superseded timer is ignored instead of double-decrementing
//! the clock. Cancellation is explicit, not an incidental overwrite.

use serde::{Deserialize, Serialize};

/// Token identifying one issued countdown.
///
/// Copyable; the embedding layer holds it and passes it back on every tick.
/// A handle from a previous round never matches the live generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle {
    generation: u64,
}

/// The engine-side countdown registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    generation: u64,
    active: bool,
}

impl Countdown {
    /// Create an inactive countdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deactivate the current countdown, if any.
    ///
    /// Handles already issued stay invalid forever; `start` never reuses a
    /// generation.
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Start a fresh countdown and issue its handle.
    ///
    /// Implicitly supersedes any previous generation.
    pub fn start(&mut self) -> TimerHandle {
        self.generation += 1;
        self.active = true;
        TimerHandle {
            generation: self.generation,
        }
    }

    /// Whether a tick carrying `handle` belongs to the live countdown.
    #[must_use]
    pub fn accepts(&self, handle: TimerHandle) -> bool {
        self.active && handle.generation == self.generation
    }

    /// Whether a countdown is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle for the live countdown, if one is active.
    #[must_use]
    pub fn current_handle(&self) -> Option<TimerHandle> {
        self.active.then_some(TimerHandle {
            generation: self.generation,
        })
    }
}
