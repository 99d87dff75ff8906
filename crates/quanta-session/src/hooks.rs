//! # Session Hooks
//!
//! Capability interfaces the session calls OUT through. The session never
//! knows what renders the breakdown (a Tauri webview, a TUI, a test probe);
//! it only knows the trait, and the concrete observer is wired in at
//! composition time.

use crate::state::PricingBreakdown;

/// Receives a breakdown snapshot after every pricing mutation.
///
/// Implementations must be cheap and non-blocking; they run on whatever task
/// mutated the session, including debounce timer tasks.
pub trait BreakdownObserver: Send + Sync {
    /// Called with the freshly recomputed breakdown.
    fn breakdown_updated(&self, breakdown: &PricingBreakdown);
}
