//! # Calculation State
//!
//! The single per-session price breakdown, and the recalculator that keeps it
//! consistent.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pricing Calculation Flow                             │
//! │                                                                         │
//! │  token input ──► set_tokens() ──┐                                       │
//! │  model pick  ──► set_rate()   ──┤                                       │
//! │                                 ▼                                       │
//! │                          recalculate()                                  │
//! │                                 │                                       │
//! │      base_price = tokens × rate │                                       │
//! │      discount   = re-derived from applied coupon/offer                  │
//! │      total      = base − base_discount − discount (floored at 0)        │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                        breakdown render (UI)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one of `applied_offer` / `applied_coupon` is set (enforced by
//!   the reconciler in [`crate::reconcile`])
//! - `discount_source` always reflects the active slot
//! - `base_discount` is orthogonal: it survives offer/coupon transitions
//! - `total_price` is never negative

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, TokenRate};
use crate::types::{BaseDiscountSchedule, CouponDefinition, DiscountSource, Offer};

// =============================================================================
// Calculation State
// =============================================================================

/// The current derived price breakdown.
///
/// One instance per page session. Token/model changes recompute it in place;
/// it is never recreated mid-session, so applied discounts survive input
/// edits (and are re-derived against the new base price).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculationState {
    /// Number of tokens being purchased.
    pub tokens: i64,

    /// Price per token for the selected model.
    pub rate: TokenRate,

    /// `tokens × rate`.
    pub base_price: Money,

    /// Server-supplied tier discount. Independent of coupon/offer.
    pub base_discount: Money,

    /// Discount from the offer/coupon slot (whichever is applied).
    pub discount: Money,

    /// `base_price − base_discount − discount`, floored at 0.
    pub total_price: Money,

    /// The applied offer, if any. Mutually exclusive with `applied_coupon`.
    pub applied_offer: Option<Offer>,

    /// The applied coupon, if any. Mutually exclusive with `applied_offer`.
    pub applied_coupon: Option<CouponDefinition>,

    /// Which mechanism currently contributes the discount.
    pub discount_source: DiscountSource,
}

impl CalculationState {
    /// Creates a fresh, uncalculated state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a prior pricing calculation exists.
    ///
    /// Discount operations require an active calculation; applying a coupon
    /// to an empty breakdown is a [`crate::PricingError::NoActiveCalculation`].
    #[inline]
    pub fn is_active(&self) -> bool {
        self.base_price.is_positive()
    }

    /// Sets the token count and recomputes the breakdown.
    pub fn set_tokens(&mut self, tokens: i64) {
        self.tokens = tokens;
        self.recalculate();
    }

    /// Sets the per-token rate (model change) and recomputes the breakdown.
    pub fn set_rate(&mut self, rate: TokenRate) {
        self.rate = rate;
        self.recalculate();
    }

    /// The pricing recalculator.
    ///
    /// Recomputes `base_price` from `tokens × rate`, re-derives the slot
    /// discount from whichever of coupon/offer is applied (a percentage
    /// discount tracks the new base), and floors the total at zero.
    ///
    /// ## Contract
    /// `total_price` is NEVER negative. All discount mutations must be
    /// followed by a call to this method.
    pub fn recalculate(&mut self) {
        self.base_price = self.rate.price_for(self.tokens);

        self.discount = if let Some(coupon) = &self.applied_coupon {
            coupon.discount_for(self.base_price)
        } else if let Some(offer) = &self.applied_offer {
            offer.discount_for(self.base_price)
        } else {
            Money::zero()
        };

        self.total_price = self
            .base_price
            .sub_floor_zero(self.base_discount + self.discount);
        self.sync_source();
    }

    /// Applies the tiered base discount schedule for the current base price.
    ///
    /// Looks up the tier AFTER recomputing the base so a token edit moves the
    /// order into the right tier.
    pub fn apply_base_schedule(&mut self, schedule: &BaseDiscountSchedule) {
        self.base_price = self.rate.price_for(self.tokens);
        self.base_discount = schedule.discount_for(self.base_price);
        self.recalculate();
    }

    /// Total saved across all discount sources.
    ///
    /// This is the "you saved ₹X" figure: base discount plus whichever of
    /// coupon/offer is applied.
    #[inline]
    pub fn total_saved(&self) -> Money {
        self.base_discount + self.discount
    }

    /// Clears the offer slot. Does not recalculate.
    pub(crate) fn clear_offer_slot(&mut self) {
        self.applied_offer = None;
    }

    /// Clears the coupon slot. Does not recalculate.
    pub(crate) fn clear_coupon_slot(&mut self) {
        self.applied_coupon = None;
    }

    /// Re-derives `discount_source` from the applied slots.
    fn sync_source(&mut self) {
        self.discount_source = if self.applied_coupon.is_some() {
            DiscountSource::Coupon
        } else if self.applied_offer.is_some() {
            DiscountSource::Offer
        } else if self.base_discount.is_positive() {
            DiscountSource::Base
        } else {
            DiscountSource::None
        };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
