//! # Pricing Session State
//!
//! Shared pricing state for one admin panel page session.
//!
//! ## Concurrency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PricingSession                                     │
//! │                                                                         │
//! │  UI event handlers ──┐                                                  │
//! │  Debounce tasks    ──┼──► Mutex<CalculationState> ──► recalculate ──┐   │
//! │  Refresh commits   ──┘                                              │   │
//! │                                                                     ▼   │
//! │                                              BreakdownObserver::        │
//! │                                              breakdown_updated()        │
//! │                                                                         │
//! │  Locks are held only for the synchronous pricing math; never across    │
//! │  an await point.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reference data (coupon registry, tier schedule) lives behind separate
//! locks so a slow refresh never blocks a keystroke recalculation.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use quanta_api::{ApiClient, UserCoupons};
use quanta_core::types::{BaseDiscountSchedule, DiscountSource, ModelPrice, Offer};
use quanta_core::validation::{validate_rate_millipaise, validate_token_count};
use quanta_core::{
    AppliedDiscount, CalculationState, CouponRegistry, Money, PricingError, ValidationError,
    MAX_TOKENS_PER_ORDER,
};

use crate::error::{SessionError, SessionResult};
use crate::hooks::BreakdownObserver;
use crate::sequence::RequestSequence;

// =============================================================================
// Breakdown Snapshot
// =============================================================================

/// A render-ready snapshot of the price breakdown.
///
/// Handed to the [`BreakdownObserver`] after every mutation, and returned
/// from every session operation so callers never hold the state lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingBreakdown {
    /// Number of tokens being purchased.
    pub tokens: i64,

    /// `tokens × rate`.
    pub base_price: Money,

    /// Tier discount from the server schedule.
    pub base_discount: Money,

    /// Discount from the applied offer/coupon, if any.
    pub discount: Money,

    /// Final payable total, never negative.
    pub total_price: Money,

    /// `base_discount + discount`.
    pub total_saved: Money,

    /// Which mechanism currently contributes the discount.
    pub discount_source: DiscountSource,

    /// Code of the applied coupon, if any.
    pub applied_coupon_code: Option<String>,

    /// Title of the applied offer, if any.
    pub applied_offer_title: Option<String>,
}

impl From<&CalculationState> for PricingBreakdown {
    fn from(calc: &CalculationState) -> Self {
        PricingBreakdown {
            tokens: calc.tokens,
            base_price: calc.base_price,
            base_discount: calc.base_discount,
            discount: calc.discount,
            total_price: calc.total_price,
            total_saved: calc.total_saved(),
            discount_source: calc.discount_source,
            applied_coupon_code: calc.applied_coupon.as_ref().map(|c| c.code.clone()),
            applied_offer_title: calc.applied_offer.as_ref().map(|o| o.title.clone()),
        }
    }
}

// =============================================================================
// Reference Data
// =============================================================================

/// Reference data returned to the caller after a refresh commit.
///
/// The coupon registry and tier schedule are installed into the session
/// directly; offers and model prices go back to the UI for its pickers.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub offers: Vec<Offer>,
    pub model_prices: Vec<ModelPrice>,
    pub coupons_loaded: usize,
}

// =============================================================================
// Pricing Session
// =============================================================================

/// Thread-safe pricing state for one page session.
///
/// Clone-cheap via internal `Arc`s; UI handlers, debounce tasks and refresh
/// tasks all share one instance.
#[derive(Clone)]
pub struct PricingSession {
    calc: Arc<Mutex<CalculationState>>,
    registry: Arc<Mutex<CouponRegistry>>,
    schedule: Arc<Mutex<BaseDiscountSchedule>>,
    observer: Option<Arc<dyn BreakdownObserver>>,
    token_cap: i64,
}

impl PricingSession {
    /// Creates a session with an empty calculation and no reference data.
    pub fn new() -> Self {
        PricingSession {
            calc: Arc::new(Mutex::new(CalculationState::new())),
            registry: Arc::new(Mutex::new(CouponRegistry::new())),
            schedule: Arc::new(Mutex::new(BaseDiscountSchedule::empty())),
            observer: None,
            token_cap: MAX_TOKENS_PER_ORDER,
        }
    }

    /// Attaches the breakdown observer. Composition-time wiring; the
    /// observer cannot change mid-session.
    pub fn with_observer(mut self, observer: Arc<dyn BreakdownObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Tightens the per-order token cap below the engine's hard limit.
    /// Comes from `[pricing] max_tokens_per_order` in the session config.
    pub fn with_token_cap(mut self, cap: i64) -> Self {
        self.token_cap = cap.min(MAX_TOKENS_PER_ORDER);
        self
    }

    // =========================================================================
    // Lock Helpers
    // =========================================================================

    fn lock_calc(&self) -> MutexGuard<'_, CalculationState> {
        self.calc.lock().expect("pricing state mutex poisoned")
    }

    /// Runs `f` with read access to the calculation state.
    pub fn with_calc<R>(&self, f: impl FnOnce(&CalculationState) -> R) -> R {
        f(&self.lock_calc())
    }

    /// Runs `f` with mutable access to the calculation state, then
    /// recalculates and notifies the observer.
    ///
    /// Escape hatch for callers that need a mutation the named operations
    /// do not cover; the named operations are preferred.
    pub fn with_calc_mut<R>(&self, f: impl FnOnce(&mut CalculationState) -> R) -> R {
        let mut calc = self.lock_calc();
        let result = f(&mut calc);
        calc.recalculate();
        self.notify(&calc);
        result
    }

    fn notify(&self, calc: &CalculationState) -> PricingBreakdown {
        let breakdown = PricingBreakdown::from(calc);
        if let Some(observer) = &self.observer {
            observer.breakdown_updated(&breakdown);
        }
        breakdown
    }

    // =========================================================================
    // Pricing Operations
    // =========================================================================

    /// Sets the token count and recomputes the breakdown, including the tier
    /// lookup against the installed schedule.
    pub fn set_token_count(&self, tokens: i64) -> SessionResult<PricingBreakdown> {
        validate_token_count(tokens).map_err(PricingError::from)?;
        if tokens > self.token_cap {
            return Err(SessionError::Pricing(PricingError::from(
                ValidationError::OutOfRange {
                    field: "tokens".to_string(),
                    min: 1,
                    max: self.token_cap,
                },
            )));
        }

        let schedule = self.schedule.lock().expect("schedule mutex poisoned");
        let mut calc = self.lock_calc();
        calc.set_tokens(tokens);
        calc.apply_base_schedule(&schedule);

        debug!(tokens, total = %calc.total_price, "token count updated");
        Ok(self.notify(&calc))
    }

    /// Switches the session to a different model's per-token rate.
    pub fn set_rate(&self, model: &ModelPrice) -> SessionResult<PricingBreakdown> {
        validate_rate_millipaise(model.rate_millipaise).map_err(PricingError::from)?;

        let schedule = self.schedule.lock().expect("schedule mutex poisoned");
        let mut calc = self.lock_calc();
        calc.set_rate(model.rate());
        calc.apply_base_schedule(&schedule);

        debug!(model = %model.model_id, "model rate updated");
        Ok(self.notify(&calc))
    }

    /// Applies a coupon by code against the installed registry.
    ///
    /// Any applied offer is displaced. Failures leave the breakdown
    /// untouched; no observer notification fires.
    pub fn apply_coupon(&self, code: &str) -> SessionResult<AppliedDiscount> {
        let registry = self.registry.lock().expect("registry mutex poisoned");
        let mut calc = self.lock_calc();

        let applied = quanta_core::apply_coupon(code, &registry, &mut calc)?;
        info!(code, saved = %applied.total_saved, "coupon applied");
        self.notify(&calc);
        Ok(applied)
    }

    /// Applies an offer, displacing any applied coupon.
    ///
    /// Validity is checked against the session clock.
    pub fn apply_offer(&self, offer: &Offer) -> SessionResult<AppliedDiscount> {
        let mut calc = self.lock_calc();

        let applied = quanta_core::apply_offer(offer, &mut calc, Utc::now())?;
        info!(offer = %offer.id, saved = %applied.total_saved, "offer applied");
        self.notify(&calc);
        Ok(applied)
    }

    /// Clears the offer/coupon slot. The tier discount persists.
    pub fn remove_discount(&self) -> PricingBreakdown {
        let mut calc = self.lock_calc();
        quanta_core::remove_discount(&mut calc);
        self.notify(&calc)
    }

    /// Current breakdown snapshot, without mutating anything.
    pub fn breakdown(&self) -> PricingBreakdown {
        PricingBreakdown::from(&*self.lock_calc())
    }

    // =========================================================================
    // Reference Data Installation
    // =========================================================================

    /// Replaces the coupon registry.
    pub fn install_registry(&self, registry: CouponRegistry) {
        *self.registry.lock().expect("registry mutex poisoned") = registry;
    }

    /// Replaces the tier schedule and reapplies it to the live breakdown.
    pub fn install_schedule(&self, schedule: BaseDiscountSchedule) {
        let mut held = self.schedule.lock().expect("schedule mutex poisoned");
        *held = schedule;

        let mut calc = self.lock_calc();
        calc.apply_base_schedule(&held);
        self.notify(&calc);
    }

    // =========================================================================
    // Backend Refresh
    // =========================================================================

    /// Fetches all reference data concurrently and commits it to the session.
    ///
    /// The commit is guarded by `seq`: a ticket is issued before the fetches
    /// start, and if a newer refresh was issued while this one was in flight
    /// the whole result is dropped with [`SessionError::StaleResponse`].
    pub async fn refresh_reference_data(
        &self,
        client: &ApiClient,
        username: &str,
        seq: &RequestSequence,
    ) -> SessionResult<ReferenceData> {
        let ticket = seq.issue();
        debug!(ticket, username, "reference data refresh started");

        let (schedule, coupons, offers, models) = tokio::join!(
            client.base_discount_levels(),
            client.user_coupons(username),
            client.offers(),
            client.model_pricing(),
        );

        let schedule = schedule?;
        let coupons: UserCoupons = coupons?;
        let offers = offers?;
        let models = models?;

        if !seq.is_current(ticket) {
            debug!(ticket, latest = seq.latest(), "refresh superseded, dropping");
            return Err(SessionError::StaleResponse {
                ticket,
                latest: seq.latest(),
            });
        }

        let coupons_loaded = coupons.available_coupons.len();
        self.install_registry(CouponRegistry::from_definitions(coupons.available_coupons));
        self.install_schedule(schedule);

        info!(ticket, coupons_loaded, offers = offers.len(), "reference data committed");
        Ok(ReferenceData {
            offers,
            model_prices: models,
            coupons_loaded,
        })
    }
}

impl Default for PricingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PricingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingSession")
            .field("breakdown", &self.breakdown())
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::types::{BaseDiscountLevel, CouponDefinition, DiscountType};
    use quanta_core::TokenRate;
    use std::sync::Mutex as StdMutex;

    fn model(rate_millipaise: i64) -> ModelPrice {
        ModelPrice {
            model_id: "model-a".into(),
            model_name: "Model A".into(),
            rate_millipaise,
            is_active: true,
        }
    }

    fn session_with_save10() -> PricingSession {
        let session = PricingSession::new();
        session.install_registry(CouponRegistry::from_definitions(vec![CouponDefinition {
            code: "SAVE10".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 1000,
            min_amount_paise: 100,
            description: "10% off".into(),
        }]));
        session
    }

    #[test]
    fn test_set_token_count_computes_base_price() {
        let session = PricingSession::new();
        session.set_rate(&model(1000)).unwrap(); // ₹0.01 per token

        let breakdown = session.set_token_count(1000).unwrap();
        assert_eq!(breakdown.base_price.paise(), 1000);
        assert_eq!(breakdown.total_price.paise(), 1000);
        assert_eq!(breakdown.discount_source, DiscountSource::None);
    }

    #[test]
    fn test_token_cap_from_config_is_enforced() {
        let session = PricingSession::new().with_token_cap(5000);
        session.set_rate(&model(1000)).unwrap();

        assert!(session.set_token_count(5000).is_ok());
        assert!(session.set_token_count(5001).is_err());
    }

    #[test]
    fn test_with_calc_accessors() {
        let session = PricingSession::new();
        session.set_rate(&model(1000)).unwrap();

        session.with_calc_mut(|calc| calc.tokens = 300);
        let base = session.with_calc(|calc| calc.base_price);
        assert_eq!(base.paise(), 300);
    }

    #[test]
    fn test_set_token_count_rejects_nonpositive() {
        let session = PricingSession::new();
        assert!(session.set_token_count(0).is_err());
        assert!(session.set_token_count(-5).is_err());
        // failed validation leaves the breakdown untouched
        assert_eq!(session.breakdown().tokens, 0);
    }

    #[test]
    fn test_coupon_survives_token_edit() {
        let session = session_with_save10();
        session.set_rate(&model(1000)).unwrap();
        session.set_token_count(1000).unwrap(); // base ₹10.00

        session.apply_coupon("SAVE10").unwrap();
        assert_eq!(session.breakdown().total_price.paise(), 900);

        // editing tokens re-derives the percentage discount
        let breakdown = session.set_token_count(2000).unwrap();
        assert_eq!(breakdown.discount.paise(), 200);
        assert_eq!(breakdown.total_price.paise(), 1800);
        assert_eq!(breakdown.applied_coupon_code.as_deref(), Some("SAVE10"));
    }

    #[test]
    fn test_remove_discount_keeps_tier_discount() {
        let session = session_with_save10();
        session.install_schedule(BaseDiscountSchedule::new(vec![BaseDiscountLevel {
            min_order_value_paise: 500,
            max_order_value_paise: None,
            discount_type: DiscountType::Percentage,
            discount_value: 500, // 5%
        }]));
        session.set_rate(&model(1000)).unwrap();
        session.set_token_count(1000).unwrap(); // base ₹10.00, tier ₹0.50

        session.apply_coupon("SAVE10").unwrap();
        assert_eq!(session.breakdown().total_saved.paise(), 150);

        let breakdown = session.remove_discount();
        assert_eq!(breakdown.base_discount.paise(), 50);
        assert_eq!(breakdown.discount.paise(), 0);
        assert_eq!(breakdown.total_price.paise(), 950);
        assert_eq!(breakdown.discount_source, DiscountSource::Base);
    }

    #[test]
    fn test_offer_displaces_coupon() {
        let session = session_with_save10();
        session.set_rate(&model(1000)).unwrap();
        session.set_token_count(1000).unwrap();
        session.apply_coupon("SAVE10").unwrap();

        let offer = Offer {
            id: "offer-1".into(),
            title: "Festive 20".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 2000,
            valid_until: None,
            is_active: true,
        };
        session.apply_offer(&offer).unwrap();

        let breakdown = session.breakdown();
        assert_eq!(breakdown.applied_coupon_code, None);
        assert_eq!(breakdown.applied_offer_title.as_deref(), Some("Festive 20"));
        assert_eq!(breakdown.total_price.paise(), 800);
    }

    #[test]
    fn test_install_schedule_reapplies_to_live_breakdown() {
        let session = PricingSession::new();
        session.set_rate(&model(1000)).unwrap();
        session.set_token_count(1000).unwrap(); // base ₹10.00

        session.install_schedule(BaseDiscountSchedule::new(vec![BaseDiscountLevel {
            min_order_value_paise: 500,
            max_order_value_paise: None,
            discount_type: DiscountType::Flat,
            discount_value: 100, // ₹1.00 flat
        }]));

        let breakdown = session.breakdown();
        assert_eq!(breakdown.base_discount.paise(), 100);
        assert_eq!(breakdown.total_price.paise(), 900);
    }

    #[test]
    fn test_observer_sees_every_mutation() {
        struct Capture(StdMutex<Vec<PricingBreakdown>>);
        impl BreakdownObserver for Capture {
            fn breakdown_updated(&self, breakdown: &PricingBreakdown) {
                self.0.lock().unwrap().push(breakdown.clone());
            }
        }

        let capture = Arc::new(Capture(StdMutex::new(Vec::new())));
        let session = session_with_save10().with_observer(capture.clone());

        session.set_rate(&model(1000)).unwrap();
        session.set_token_count(1000).unwrap();
        session.apply_coupon("SAVE10").unwrap();

        let seen = capture.0.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.last().unwrap().total_price.paise(), 900);
    }

    #[test]
    fn test_failed_coupon_does_not_notify() {
        struct Count(StdMutex<u32>);
        impl BreakdownObserver for Count {
            fn breakdown_updated(&self, _: &PricingBreakdown) {
                *self.0.lock().unwrap() += 1;
            }
        }

        let count = Arc::new(Count(StdMutex::new(0)));
        let session = session_with_save10().with_observer(count.clone());
        session.set_rate(&model(1000)).unwrap();
        session.set_token_count(1000).unwrap();
        let before = *count.0.lock().unwrap();

        assert!(session.apply_coupon("BOGUS").is_err());
        assert_eq!(*count.0.lock().unwrap(), before);
    }

    #[test]
    fn test_breakdown_from_state_uses_rate() {
        let mut calc = CalculationState::new();
        calc.set_rate(TokenRate::from_paise(2));
        calc.set_tokens(250);

        let breakdown = PricingBreakdown::from(&calc);
        assert_eq!(breakdown.base_price.paise(), 500);
        assert_eq!(breakdown.total_saved.paise(), 0);
    }
}
