//! The game session engine: construction, lifecycle, submission,
//! composition, and checkpointing.

pub mod builder;
pub mod session;
pub mod snapshot;

pub use builder::{EngineBuilder, EngineConfig};
pub use session::{Engine, Feasibility, SubmitOutcome, TickOutcome};
pub use snapshot::EngineSnapshot;
