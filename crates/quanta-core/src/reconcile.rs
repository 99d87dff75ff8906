//! # Offer/Discount Reconciler
//!
//! Guarantees the exactly-one-of {offer, coupon} invariant on
//! [`CalculationState`], and applies offers through it.
//!
//! The offer/coupon slot is winner-takes-all: applying one source clears the
//! other before the new discount lands. The tiered base discount is
//! orthogonal and is never touched here.

use chrono::{DateTime, Utc};

use crate::calculation::CalculationState;
use crate::coupon::AppliedDiscount;
use crate::error::{PricingError, PricingResult};
use crate::types::{DiscountSource, Offer};

// =============================================================================
// Reconciler
// =============================================================================

/// Clears whichever discount slot conflicts with `incoming`, then
/// recalculates.
///
/// ## Behavior
/// - `Coupon`: clears any applied offer (coupon slot is about to be written)
/// - `Offer`: clears any applied coupon
/// - `Base` / `None`: clears both slots
/// - `base_discount` is never modified
///
/// Idempotent: reconciling to the same source twice produces no side effects
/// beyond recomputing totals.
pub fn reconcile(calc: &mut CalculationState, incoming: DiscountSource) {
    match incoming {
        DiscountSource::Coupon => calc.clear_offer_slot(),
        DiscountSource::Offer => calc.clear_coupon_slot(),
        DiscountSource::Base | DiscountSource::None => {
            calc.clear_offer_slot();
            calc.clear_coupon_slot();
        }
    }
    calc.recalculate();
}

/// Applies an admin-configured offer to the current calculation.
///
/// Mirrors the coupon evaluator's contract: requires an active calculation,
/// rejects inactive/expired offers, clears any applied coupon first, and
/// floors the total at zero. Core is clock-free, so the caller passes `now`.
pub fn apply_offer(
    offer: &Offer,
    calc: &mut CalculationState,
    now: DateTime<Utc>,
) -> PricingResult<AppliedDiscount> {
    if !calc.is_active() {
        return Err(PricingError::NoActiveCalculation);
    }

    if !offer.is_redeemable(now) {
        return Err(PricingError::OfferNotActive {
            title: offer.title.clone(),
        });
    }

    reconcile(calc, DiscountSource::Offer);

    calc.applied_offer = Some(offer.clone());
    calc.recalculate();

    let amount = calc.discount;
    let total_saved = calc.total_saved();
    let message = format!("Offer '{}' applied. You saved {}!", offer.title, total_saved);

    Ok(AppliedDiscount {
        amount,
        total_saved,
        message,
    })
}

/// Removes whatever occupies the offer/coupon slot.
///
/// The base discount persists; the total is recomputed.
pub fn remove_discount(calc: &mut CalculationState) {
    reconcile(calc, DiscountSource::None);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::{apply_coupon, CouponRegistry};
    use crate::money::{Money, TokenRate};
    use crate::types::{CouponDefinition, DiscountType};

    fn percent_offer(bps: i64) -> Offer {
        Offer {
            id: "550e8400-e29b-41d4-a716-446655440000".into(),
            title: "Festive sale".into(),
            discount_type: DiscountType::Percentage,
            discount_value: bps,
            valid_until: None,
            is_active: true,
        }
    }

    fn registry() -> CouponRegistry {
        CouponRegistry::from_definitions(vec![CouponDefinition {
            code: "SAVE10".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 1000,
            min_amount_paise: 100,
            description: String::new(),
        }])
    }

    fn calc_with_base(paise: i64) -> CalculationState {
        let mut calc = CalculationState::new();
        calc.set_rate(TokenRate::from_paise(1));
        calc.set_tokens(paise);
        calc
    }

    #[test]
    fn test_offer_clears_coupon() {
        let mut calc = calc_with_base(1000);
        calc.base_discount = Money::from_paise(30);
        calc.recalculate();

        apply_coupon("SAVE10", &registry(), &mut calc).unwrap();
        assert!(calc.applied_coupon.is_some());

        apply_offer(&percent_offer(2000), &mut calc, Utc::now()).unwrap();
        assert!(calc.applied_coupon.is_none());
        assert!(calc.applied_offer.is_some());
        assert_eq!(calc.discount_source, DiscountSource::Offer);
        assert_eq!(calc.discount.paise(), 200);
        // base discount survives the transition
        assert_eq!(calc.base_discount.paise(), 30);
        assert_eq!(calc.total_price.paise(), 770);
    }

    #[test]
    fn test_coupon_clears_offer() {
        let mut calc = calc_with_base(1000);
        calc.base_discount = Money::from_paise(30);
        calc.recalculate();

        apply_offer(&percent_offer(2000), &mut calc, Utc::now()).unwrap();
        apply_coupon("SAVE10", &registry(), &mut calc).unwrap();

        assert!(calc.applied_offer.is_none());
        assert!(calc.applied_coupon.is_some());
        assert_eq!(calc.discount.paise(), 100);
        assert_eq!(calc.base_discount.paise(), 30);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut calc = calc_with_base(1000);
        apply_offer(&percent_offer(1000), &mut calc, Utc::now()).unwrap();

        reconcile(&mut calc, DiscountSource::Offer);
        let once = calc.clone();
        reconcile(&mut calc, DiscountSource::Offer);
        assert_eq!(calc, once);
        assert!(calc.applied_offer.is_some());
    }

    #[test]
    fn test_remove_discount_keeps_base() {
        let mut calc = calc_with_base(1000);
        calc.base_discount = Money::from_paise(50);
        apply_coupon("SAVE10", &registry(), &mut calc).unwrap();

        remove_discount(&mut calc);
        assert!(calc.applied_coupon.is_none());
        assert!(calc.applied_offer.is_none());
        assert_eq!(calc.base_discount.paise(), 50);
        assert_eq!(calc.total_price.paise(), 950);
        assert_eq!(calc.discount_source, DiscountSource::Base);
    }

    #[test]
    fn test_inactive_offer_rejected() {
        let mut calc = calc_with_base(1000);
        let mut offer = percent_offer(1000);
        offer.is_active = false;

        let err = apply_offer(&offer, &mut calc, Utc::now()).unwrap_err();
        assert!(matches!(err, PricingError::OfferNotActive { .. }));
        assert!(calc.applied_offer.is_none());
    }

    #[test]
    fn test_expired_offer_rejected() {
        let mut calc = calc_with_base(1000);
        let mut offer = percent_offer(1000);
        offer.valid_until = Some(Utc::now() - chrono::Duration::days(1));

        let err = apply_offer(&offer, &mut calc, Utc::now()).unwrap_err();
        assert!(matches!(err, PricingError::OfferNotActive { .. }));
    }

    #[test]
    fn test_offer_requires_active_calculation() {
        let mut calc = CalculationState::new();
        let err = apply_offer(&percent_offer(1000), &mut calc, Utc::now()).unwrap_err();
        assert!(matches!(err, PricingError::NoActiveCalculation));
    }
}
