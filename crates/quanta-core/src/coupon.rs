//! # Coupon Evaluator
//!
//! Validates a coupon code against the registry and the current calculation,
//! then applies it through the reconciler.
//!
//! ## Evaluation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_coupon("SAVE10")                                                 │
//! │       │                                                                 │
//! │       ├── no active calculation? → Err(NoActiveCalculation)            │
//! │       │                                                                 │
//! │       ├── code format invalid?   → Err(Validation)                     │
//! │       │                                                                 │
//! │       ├── not in registry?       → Err(UnknownCoupon)                  │
//! │       │                                                                 │
//! │       ├── base < min_amount?     → Err(BelowMinimumAmount)             │
//! │       │                            (state untouched)                    │
//! │       ▼                                                                 │
//! │  reconcile(Coupon)   clears any applied offer; base discount persists  │
//! │       ▼                                                                 │
//! │  set applied_coupon, recalculate (discount, total floored at 0)        │
//! │       ▼                                                                 │
//! │  AppliedDiscount { amount, total_saved, message }                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The step order matters: reconciliation must run before the discount is
//! recomputed, otherwise a lingering offer would double-discount the total.
//! No network I/O happens here; eligibility is purely local once the
//! registry and calculation exist.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculation::CalculationState;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::reconcile::reconcile;
use crate::types::{CouponDefinition, DiscountSource};
use crate::validation::validate_coupon_code;

// =============================================================================
// Coupon Registry
// =============================================================================

/// Registry of redeemable coupons, keyed by code.
///
/// Codes are uppercase and matched case-sensitively; normalization is the
/// caller's problem (the validator rejects lowercase input outright).
/// Entries are immutable reference data hydrated from the backend at load
/// time.
#[derive(Debug, Clone, Default)]
pub struct CouponRegistry {
    coupons: HashMap<String, CouponDefinition>,
}

impl CouponRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list of definitions.
    ///
    /// Later duplicates of a code replace earlier ones, matching the
    /// backend's last-write-wins coupon table.
    pub fn from_definitions(definitions: Vec<CouponDefinition>) -> Self {
        let coupons = definitions
            .into_iter()
            .map(|d| (d.code.clone(), d))
            .collect();
        CouponRegistry { coupons }
    }

    /// Inserts or replaces a single definition.
    pub fn insert(&mut self, definition: CouponDefinition) {
        self.coupons.insert(definition.code.clone(), definition);
    }

    /// Looks up a code (case-sensitive).
    pub fn get(&self, code: &str) -> Option<&CouponDefinition> {
        self.coupons.get(code)
    }

    /// Number of registered coupons.
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Whether the registry has no coupons.
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

// =============================================================================
// Applied Discount
// =============================================================================

/// The user-facing result of a successful coupon or offer application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedDiscount {
    /// Discount contributed by the coupon/offer itself.
    pub amount: Money,

    /// Combined savings: base discount + coupon/offer discount.
    pub total_saved: Money,

    /// Ready-to-display summary line.
    pub message: String,
}

// =============================================================================
// Coupon Evaluator
// =============================================================================

/// Applies a coupon code to the current calculation.
///
/// ## Preconditions
/// A prior pricing calculation must exist (`base_price > 0`), the code must
/// be a registered coupon, and the base price must meet the coupon's
/// minimum. On any failure the calculation's discount fields are left
/// unchanged.
///
/// ## Example
/// ```rust
/// use quanta_core::calculation::CalculationState;
/// use quanta_core::coupon::{apply_coupon, CouponRegistry};
/// use quanta_core::money::TokenRate;
/// use quanta_core::types::{CouponDefinition, DiscountType};
///
/// let registry = CouponRegistry::from_definitions(vec![CouponDefinition {
///     code: "SAVE10".into(),
///     discount_type: DiscountType::Percentage,
///     discount_value: 1000,
///     min_amount_paise: 100,
///     description: "10% off".into(),
/// }]);
///
/// let mut calc = CalculationState::new();
/// calc.set_rate(TokenRate::from_paise(1));
/// calc.set_tokens(1000); // base ₹10.00
///
/// let applied = apply_coupon("SAVE10", &registry, &mut calc).unwrap();
/// assert_eq!(applied.amount.paise(), 100);
/// assert_eq!(calc.total_price.paise(), 900);
/// ```
pub fn apply_coupon(
    code: &str,
    registry: &CouponRegistry,
    calc: &mut CalculationState,
) -> PricingResult<AppliedDiscount> {
    if !calc.is_active() {
        return Err(PricingError::NoActiveCalculation);
    }

    let code = validate_coupon_code(code)?;

    let definition = registry
        .get(code)
        .ok_or_else(|| PricingError::UnknownCoupon {
            code: code.to_string(),
        })?
        .clone();

    if calc.base_price < definition.min_amount() {
        return Err(PricingError::BelowMinimumAmount {
            required: definition.min_amount(),
            base_price: calc.base_price,
        });
    }

    // Step order is load-bearing: clear the offer slot before computing the
    // coupon discount so the recalculation sees exactly one slot discount.
    reconcile(calc, DiscountSource::Coupon);

    calc.applied_coupon = Some(definition.clone());
    calc.recalculate();

    let amount = calc.discount;
    let total_saved = calc.total_saved();
    let message = if calc.base_discount.is_positive() {
        format!(
            "Coupon {} applied. You saved {} ({} coupon + {} tier discount)!",
            definition.code, total_saved, amount, calc.base_discount
        )
    } else {
        format!("Coupon {} applied. You saved {}!", definition.code, amount)
    };

    Ok(AppliedDiscount {
        amount,
        total_saved,
        message,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::TokenRate;
    use crate::types::DiscountType;

    fn registry() -> CouponRegistry {
        CouponRegistry::from_definitions(vec![
            CouponDefinition {
                code: "SAVE10".into(),
                discount_type: DiscountType::Percentage,
                discount_value: 1000,
                min_amount_paise: 100,
                description: "10% off".into(),
            },
            CouponDefinition {
                code: "FLAT50".into(),
                discount_type: DiscountType::Flat,
                discount_value: 50,
                min_amount_paise: 200,
                description: "₹0.50 off".into(),
            },
            CouponDefinition {
                code: "WELCOME15".into(),
                discount_type: DiscountType::Percentage,
                discount_value: 1500,
                min_amount_paise: 500,
                description: "15% off for new users".into(),
            },
        ])
    }

    fn calc_with_base(paise: i64) -> CalculationState {
        let mut calc = CalculationState::new();
        calc.set_rate(TokenRate::from_paise(1));
        calc.set_tokens(paise);
        calc
    }

    #[test]
    fn test_save10_scenario() {
        // base ₹10.00, SAVE10 (10%, min ₹1.00) → discount ₹1.00, total ₹9.00
        let mut calc = calc_with_base(1000);
        let applied = apply_coupon("SAVE10", &registry(), &mut calc).unwrap();

        assert_eq!(applied.amount.paise(), 100);
        assert_eq!(calc.total_price.paise(), 900);
        assert_eq!(calc.discount_source, DiscountSource::Coupon);
    }

    #[test]
    fn test_below_minimum_leaves_state_unchanged() {
        // base ₹1.50, FLAT50 requires ₹2.00
        let mut calc = calc_with_base(150);
        let before = calc.clone();

        let err = apply_coupon("FLAT50", &registry(), &mut calc).unwrap_err();
        assert!(matches!(
            err,
            PricingError::BelowMinimumAmount { required, .. }
                if required.paise() == 200
        ));
        assert_eq!(calc, before);
    }

    #[test]
    fn test_welcome15_with_base_discount() {
        // base ₹5.00, base_discount ₹0.50, WELCOME15 (15%, min ₹5.00)
        let mut calc = calc_with_base(500);
        calc.base_discount = Money::from_paise(50);
        calc.recalculate();

        let applied = apply_coupon("WELCOME15", &registry(), &mut calc).unwrap();
        assert_eq!(applied.amount.paise(), 75);
        assert_eq!(applied.total_saved.paise(), 125);
        assert_eq!(calc.total_price.paise(), 375);
        assert!(applied.message.contains("tier discount"));
    }

    #[test]
    fn test_flat_coupon_never_negative() {
        let mut calc = calc_with_base(10_000);
        let mut reg = registry();
        reg.insert(CouponDefinition {
            code: "FLAT200".into(),
            discount_type: DiscountType::Flat,
            discount_value: 20_000,
            min_amount_paise: 0,
            description: String::new(),
        });

        let applied = apply_coupon("FLAT200", &reg, &mut calc).unwrap();
        assert_eq!(applied.amount.paise(), 10_000); // capped at base
        assert_eq!(calc.total_price, Money::zero());
    }

    #[test]
    fn test_unknown_coupon() {
        let mut calc = calc_with_base(1000);
        let err = apply_coupon("NOPE99", &registry(), &mut calc).unwrap_err();
        assert!(matches!(err, PricingError::UnknownCoupon { code } if code == "NOPE99"));
    }

    #[test]
    fn test_padded_code_is_trimmed_before_lookup() {
        let mut calc = calc_with_base(1000);
        let applied = apply_coupon("  SAVE10 ", &registry(), &mut calc).unwrap();

        assert_eq!(applied.amount.paise(), 100);
        assert_eq!(calc.applied_coupon.as_ref().unwrap().code, "SAVE10");
    }

    #[test]
    fn test_lowercase_code_rejected_before_lookup() {
        let mut calc = calc_with_base(1000);
        let err = apply_coupon("save10", &registry(), &mut calc).unwrap_err();
        assert!(matches!(err, PricingError::Validation(_)));
    }

    #[test]
    fn test_no_active_calculation() {
        let mut calc = CalculationState::new();
        let err = apply_coupon("SAVE10", &registry(), &mut calc).unwrap_err();
        assert!(matches!(err, PricingError::NoActiveCalculation));
    }

    #[test]
    fn test_idempotent_application() {
        let mut calc = calc_with_base(1000);
        apply_coupon("SAVE10", &registry(), &mut calc).unwrap();
        let once = calc.clone();

        apply_coupon("SAVE10", &registry(), &mut calc).unwrap();
        assert_eq!(calc, once);
    }

    #[test]
    fn test_registry_last_write_wins() {
        let mut reg = CouponRegistry::new();
        assert!(reg.is_empty());

        reg.insert(CouponDefinition {
            code: "SAVE10".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 1000,
            min_amount_paise: 0,
            description: String::new(),
        });
        reg.insert(CouponDefinition {
            code: "SAVE10".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 2000,
            min_amount_paise: 0,
            description: String::new(),
        });

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("SAVE10").unwrap().discount_value, 2000);
    }
}
