//! # quanta-core: Pure Pricing Logic for Quanta Checkout
//!
//! This crate is the **heart** of Quanta Checkout. It contains the pricing
//! and discount engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Quanta Checkout Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Admin Panel Frontend (JS/TS)                    │   │
//! │  │    token input ──► coupon field ──► breakdown render            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  quanta-session (orchestration)                 │   │
//! │  │    debounced recalculation, request sequencing, config          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quanta-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐ │   │
//! │  │   │   money   │  │   types   │  │  coupon   │  │ reconcile  │ │   │
//! │  │   │   Money   │  │  Coupon   │  │ Evaluator │  │ one-of     │ │   │
//! │  │   │ TokenRate │  │   Offer   │  │ Registry  │  │ {offer,    │ │   │
//! │  │   │           │  │   Tiers   │  │           │  │  coupon}   │ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 quanta-api (backend client)                     │   │
//! │  │      offers, coupons, tiers, model pricing over HTTP/JSON       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in integer paise, per-token rates (no floating point!)
//! - [`types`] - Domain types (CouponDefinition, Offer, tiers, model prices)
//! - [`error`] - Domain error types
//! - [`calculation`] - The per-session CalculationState and recalculator
//! - [`coupon`] - Coupon registry and evaluator
//! - [`reconcile`] - Exactly-one-of {offer, coupon} reconciliation
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use quanta_core::calculation::CalculationState;
//! use quanta_core::coupon::{apply_coupon, CouponRegistry};
//! use quanta_core::money::TokenRate;
//! use quanta_core::types::{CouponDefinition, DiscountType};
//!
//! let registry = CouponRegistry::from_definitions(vec![CouponDefinition {
//!     code: "SAVE10".into(),
//!     discount_type: DiscountType::Percentage,
//!     discount_value: 1000, // 10%
//!     min_amount_paise: 100,
//!     description: "10% off".into(),
//! }]);
//!
//! let mut calc = CalculationState::new();
//! calc.set_rate(TokenRate::from_paise(1));
//! calc.set_tokens(1000); // base price ₹10.00
//!
//! let applied = apply_coupon("SAVE10", &registry, &mut calc).unwrap();
//! assert_eq!(calc.total_price.paise(), 900);
//! assert_eq!(applied.total_saved.paise(), 100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculation;
pub mod coupon;
pub mod error;
pub mod money;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quanta_core::Money` instead of
// `use quanta_core::money::Money`

pub use calculation::CalculationState;
pub use coupon::{apply_coupon, AppliedDiscount, CouponRegistry};
pub use error::{PricingError, PricingResult, ValidationError};
pub use money::{Money, TokenRate};
pub use reconcile::{apply_offer, reconcile, remove_discount};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum tokens purchasable in a single order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., pasting a balance into the token
/// field) and keeps `tokens × rate` far from i64 overflow territory.
pub const MAX_TOKENS_PER_ORDER: i64 = 100_000_000;

/// Maximum length of a coupon code.
///
/// ## Business Reason
/// The backend's coupon table caps codes at 32 characters; rejecting longer
/// input locally avoids a guaranteed-failing lookup.
pub const MAX_COUPON_CODE_LEN: usize = 32;
