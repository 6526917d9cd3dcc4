//! What to do when a dictionary lookup cannot be completed.
//!
//! Historically this game treated an unverifiable word as accepted. That
//! fail-open stance lets any string score points during an outage, so it
//! is surfaced here as an explicit, configurable policy instead of a
//! silent default.

use serde::{Deserialize, Serialize};

/// Resolution policy for `Lookup::Unknown`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupPolicy {
    /// Treat an unverifiable word as accepted. The historical behavior;
    /// the default.
    #[default]
    FailOpen,
    /// Treat an unverifiable word as rejected.
    FailClosed,
    /// Re-ask the dictionary up to `attempts` more times, then reject.
    Retry {
        /// Additional lookups allowed after the first failure.
        attempts: u32,
    },
}

impl LookupPolicy {
    /// Additional lookup attempts allowed after the first `Unknown`.
    #[must_use]
    pub fn extra_attempts(self) -> u32 {
        match self {
            LookupPolicy::FailOpen | LookupPolicy::FailClosed => 0,
            LookupPolicy::Retry { attempts } => attempts,
        }
    }

    /// Whether an exhausted lookup is accepted.
    #[must_use]
    pub fn accepts_unverified(self) -> bool {
        matches!(self, LookupPolicy::FailOpen)
    }
}
