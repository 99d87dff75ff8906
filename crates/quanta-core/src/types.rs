//! # Domain Types
//!
//! Core domain types used throughout Quanta Checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ CouponDefinition │  │      Offer       │  │ BaseDiscountLevel│      │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────  │      │
//! │  │  code            │  │  id (UUID)       │  │  min_order_value │      │
//! │  │  discount_type   │  │  title           │  │  max_order_value │      │
//! │  │  discount_value  │  │  discount_type   │  │  discount_type   │      │
//! │  │  min_amount      │  │  valid_until     │  │  discount_value  │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐                            │
//! │  │   DiscountType   │  │  DiscountSource  │                            │
//! │  │  ──────────────  │  │  ──────────────  │                            │
//! │  │  Percentage      │  │  None            │                            │
//! │  │  Flat            │  │  Base            │                            │
//! │  └──────────────────┘  │  Offer           │                            │
//! │                        │  Coupon          │                            │
//! │                        └──────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Discount Value Encoding
//! `discount_value` is interpreted per `discount_type`:
//! - `Percentage`: basis points (1000 = 10%)
//! - `Flat`: paise
//!
//! This mirrors the backend's `{discountType, discountValue}` wire shape
//! while keeping all arithmetic in integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, TokenRate};

// =============================================================================
// Discount Type
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage of the base price, value in basis points.
    Percentage,
    /// Fixed amount off, value in paise. Capped at the base price.
    Flat,
}

impl DiscountType {
    /// Computes the discount amount for a base price.
    ///
    /// ## Contract
    /// - Percentage: `base × bps / 10000`, rounded half up
    /// - Flat: `min(value, base)` so the total can never go negative
    /// - Values outside the valid range (negative, or over 100% for
    ///   Percentage) clamp to the nearest bound rather than wrapping
    ///   through the integer cast; bad wire data yields a sane discount
    pub fn discount_for(&self, base_price: Money, discount_value: i64) -> Money {
        match self {
            DiscountType::Percentage => {
                let bps = discount_value.clamp(0, 10_000) as u32;
                base_price.percentage_bps(bps)
            }
            DiscountType::Flat => Money::from_paise(discount_value.max(0)).min(base_price),
        }
    }
}

// =============================================================================
// Discount Source
// =============================================================================

/// Which mechanism currently contributes the discount on top of base.
///
/// ## Mutual Exclusion
/// `Offer` and `Coupon` occupy the same slot: applying one clears the other.
/// `Base` (the tiered schedule discount) is orthogonal and coexists with
/// either; the source reports `Base` only when it is the sole discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountSource {
    /// No discount is active.
    #[default]
    None,
    /// Only the tiered base discount applies.
    Base,
    /// An admin-configured offer occupies the discount slot.
    Offer,
    /// A user-entered coupon occupies the discount slot.
    Coupon,
}

// =============================================================================
// Coupon Definition
// =============================================================================

/// A redeemable coupon code.
///
/// Immutable reference data, fetched from the backend or seeded at load time.
/// Codes are uppercase and matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CouponDefinition {
    /// The code the user types, e.g. "SAVE10".
    pub code: String,

    /// How `discount_value` is interpreted.
    pub discount_type: DiscountType,

    /// Basis points for Percentage, paise for Flat.
    pub discount_value: i64,

    /// Minimum base price (paise) required to redeem.
    pub min_amount_paise: i64,

    /// Human-readable description shown next to the code.
    pub description: String,
}

impl CouponDefinition {
    /// Returns the minimum qualifying order value.
    #[inline]
    pub fn min_amount(&self) -> Money {
        Money::from_paise(self.min_amount_paise)
    }

    /// Computes this coupon's discount for a base price.
    #[inline]
    pub fn discount_for(&self, base_price: Money) -> Money {
        self.discount_type.discount_for(base_price, self.discount_value)
    }
}

// =============================================================================
// Offer
// =============================================================================

/// An admin-configured promotional discount.
///
/// Mutually exclusive with coupon application: the reconciler guarantees at
/// most one of {offer, coupon} is applied at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Offer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title, e.g. "Festive 20% off".
    pub title: String,

    /// How `discount_value` is interpreted.
    pub discount_type: DiscountType,

    /// Basis points for Percentage, paise for Flat.
    pub discount_value: i64,

    /// Optional expiry. `None` means no expiry.
    #[ts(as = "Option<String>")]
    pub valid_until: Option<DateTime<Utc>>,

    /// Admin kill switch.
    pub is_active: bool,
}

impl Offer {
    /// Checks whether the offer can be applied at `now`.
    ///
    /// Core is clock-free: callers pass the current time.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        match self.valid_until {
            Some(until) => now <= until,
            None => true,
        }
    }

    /// Computes this offer's discount for a base price.
    #[inline]
    pub fn discount_for(&self, base_price: Money) -> Money {
        self.discount_type.discount_for(base_price, self.discount_value)
    }
}

// =============================================================================
// Base Discount Schedule
// =============================================================================

/// One tier of the server-supplied base discount schedule.
///
/// A level matches orders in `[min_order_value, max_order_value)`;
/// `max_order_value = None` means unbounded (the top tier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BaseDiscountLevel {
    /// Inclusive lower bound, paise.
    pub min_order_value_paise: i64,

    /// Exclusive upper bound, paise. `None` = unbounded.
    pub max_order_value_paise: Option<i64>,

    /// How `discount_value` is interpreted.
    pub discount_type: DiscountType,

    /// Basis points for Percentage, paise for Flat.
    pub discount_value: i64,
}

impl BaseDiscountLevel {
    /// Checks whether an order value falls in this tier.
    pub fn matches(&self, order_value: Money) -> bool {
        let paise = order_value.paise();
        if paise < self.min_order_value_paise {
            return false;
        }
        match self.max_order_value_paise {
            Some(max) => paise < max,
            None => true,
        }
    }
}

/// The tiered base discount schedule.
///
/// Independent of coupons and offers: a tier discount persists across
/// offer/coupon transitions. Levels are kept sorted by lower bound so lookup
/// takes the first (most specific) match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BaseDiscountSchedule {
    pub levels: Vec<BaseDiscountLevel>,
}

impl BaseDiscountSchedule {
    /// Creates an empty schedule (no tier discounts).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a schedule from levels, sorting them by lower bound.
    pub fn new(mut levels: Vec<BaseDiscountLevel>) -> Self {
        levels.sort_by_key(|l| l.min_order_value_paise);
        BaseDiscountSchedule { levels }
    }

    /// Finds the tier matching an order value, if any.
    pub fn level_for(&self, order_value: Money) -> Option<&BaseDiscountLevel> {
        self.levels.iter().find(|l| l.matches(order_value))
    }

    /// Computes the tier discount for an order value.
    ///
    /// Returns zero when no tier matches.
    pub fn discount_for(&self, order_value: Money) -> Money {
        self.level_for(order_value)
            .map(|l| l.discount_type.discount_for(order_value, l.discount_value))
            .unwrap_or_else(Money::zero)
    }
}

// =============================================================================
// Model Price
// =============================================================================

/// Per-model token pricing from the AI models pricing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelPrice {
    /// Stable model identifier, e.g. "gpt-4o".
    pub model_id: String,

    /// Display name for the model picker.
    pub model_name: String,

    /// Price per token in millipaise.
    pub rate_millipaise: i64,

    /// Whether the model is currently purchasable.
    pub is_active: bool,
}

impl ModelPrice {
    /// Returns the rate as a TokenRate.
    #[inline]
    pub fn rate(&self) -> TokenRate {
        TokenRate::from_millipaise(self.rate_millipaise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
