//! Diagnostics collaborator.
//!
//! The engine reports recoverable trouble - failed dictionary lookups,
//! failed profile writes - to whatever the embedding layer plugs in here.
//! Ordinary validation rejections are outcomes, not diagnostics, and are
//! never routed through this trait.

use crate::store::StoreError;

/// Observer for recoverable engine trouble. All methods default to no-ops.
pub trait Diagnostics: Send + Sync {
    /// A dictionary lookup for `word` could not be completed.
    fn lookup_failed(&self, _word: &str) {}

    /// Persisting the profile failed; the round outcome is unaffected.
    fn persist_failed(&self, _error: &StoreError) {}
}

/// The default observer: ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {}
