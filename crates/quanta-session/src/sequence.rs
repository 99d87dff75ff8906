//! # Request Sequencing
//!
//! Guards against out-of-order async responses.
//!
//! ## The Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  t0: user types "1000"  → fetch #1 issued                               │
//! │  t1: user types "10000" → fetch #2 issued                               │
//! │  t2: fetch #2 resolves  → breakdown shows pricing for 10000             │
//! │  t3: fetch #1 resolves  → WITHOUT A GUARD, the stale pricing for 1000   │
//! │                           overwrites the newer breakdown                │
//! │                                                                         │
//! │  WITH the guard: fetch #1 checks is_current(1) at t3, sees latest = 2,  │
//! │  and is dropped before touching session state.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Latest-wins semantics: only the most recently issued ticket may commit.
//! If the newest request fails, nothing commits; the user re-triggers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic ticket counter for one interaction type.
///
/// Keep one `RequestSequence` per interaction (pricing refresh, coupon list,
/// ...) so unrelated fetches never invalidate each other.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    /// Creates a sequence with no tickets issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket, superseding all earlier ones.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Checks whether `ticket` is still the latest issued.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Returns the latest issued ticket (0 when none).
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
