//! Round lifecycle data: phase, clock, history, and countdown ownership.

pub mod state;
pub mod timer;

pub use state::{AcceptRecord, RoundPhase, RoundState, RoundSummary};
pub use timer::{Countdown, TimerHandle};
