//! # Wire Types
//!
//! DTOs matching the backend's JSON shapes, plus conversions into
//! quanta-core domain types.
//!
//! ## Conventions
//! - Field names are camelCase on the wire (the backend is a JS service)
//! - Monetary values arrive as decimal rupees; conversion into integer paise
//!   happens HERE, once, at the boundary. Domain types never see floats.
//! - Percentage values arrive as percentage points (10 = 10%) and convert to
//!   basis points (1000)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quanta_core::types::{
    BaseDiscountLevel, BaseDiscountSchedule, CouponDefinition, DiscountType, ModelPrice, Offer,
};

// =============================================================================
// Boundary Conversions
// =============================================================================

/// Converts decimal rupees from the wire into integer paise.
///
/// Rounds half away from zero; a backend value of 10.999 becomes 1100 paise.
#[inline]
pub(crate) fn rupees_to_paise(rupees: f64) -> i64 {
    (rupees * 100.0).round() as i64
}

/// Converts percentage points from the wire into basis points.
#[inline]
pub(crate) fn percent_to_bps(percent: f64) -> i64 {
    (percent * 100.0).round() as i64
}

/// Converts a wire discount value per its type: rupees for flat discounts,
/// percentage points for percentage discounts.
fn discount_value_to_domain(discount_type: DiscountType, value: f64) -> i64 {
    match discount_type {
        DiscountType::Percentage => percent_to_bps(value),
        DiscountType::Flat => rupees_to_paise(value),
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// The backend's standard response envelope.
///
/// Every field is optional on purpose: the client treats a missing `success`
/// flag as a malformed response rather than a deserialization failure, so
/// the error message can say what was actually wrong.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub message: Option<String>,
}

// =============================================================================
// Base Discount
// =============================================================================

/// `POST /base_discount` response data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDiscountData {
    pub levels: Vec<BaseDiscountLevelDto>,
}

/// One tier as the backend sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDiscountLevelDto {
    pub min_order_value: f64,
    pub max_order_value: Option<f64>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}

impl From<BaseDiscountLevelDto> for BaseDiscountLevel {
    fn from(dto: BaseDiscountLevelDto) -> Self {
        BaseDiscountLevel {
            min_order_value_paise: rupees_to_paise(dto.min_order_value),
            max_order_value_paise: dto.max_order_value.map(rupees_to_paise),
            discount_value: discount_value_to_domain(dto.discount_type, dto.discount_value),
            discount_type: dto.discount_type,
        }
    }
}

impl From<BaseDiscountData> for BaseDiscountSchedule {
    fn from(data: BaseDiscountData) -> Self {
        BaseDiscountSchedule::new(data.levels.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// Offers
// =============================================================================

/// One offer as the admin offers endpoint sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDto {
    pub id: String,
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<OfferDto> for Offer {
    fn from(dto: OfferDto) -> Self {
        Offer {
            id: dto.id,
            title: dto.title,
            discount_value: discount_value_to_domain(dto.discount_type, dto.discount_value),
            discount_type: dto.discount_type,
            valid_until: dto.valid_until,
            is_active: dto.is_active,
        }
    }
}

// =============================================================================
// User Coupons
// =============================================================================

/// One coupon as the backend sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDto {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub min_amount: f64,
    #[serde(default)]
    pub description: String,
}

impl From<CouponDto> for CouponDefinition {
    fn from(dto: CouponDto) -> Self {
        CouponDefinition {
            code: dto.code,
            discount_value: discount_value_to_domain(dto.discount_type, dto.discount_value),
            discount_type: dto.discount_type,
            min_amount_paise: rupees_to_paise(dto.min_amount),
            description: dto.description,
        }
    }
}

/// `POST /admin/get_user_coupons` response data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCouponsData {
    pub username: String,
    pub available_coupons: Vec<CouponDto>,
    #[serde(default)]
    pub offers_used: i64,
}

/// Domain view of a user's coupon entitlements.
#[derive(Debug, Clone)]
pub struct UserCoupons {
    pub username: String,
    pub available_coupons: Vec<CouponDefinition>,
    pub offers_used: i64,
}

impl From<UserCouponsData> for UserCoupons {
    fn from(data: UserCouponsData) -> Self {
        UserCoupons {
            username: data.username,
            available_coupons: data.available_coupons.into_iter().map(Into::into).collect(),
            offers_used: data.offers_used,
        }
    }
}

// =============================================================================
// Disputes
// =============================================================================

/// Optional filters for `POST /admin/fetch_disputes`.
///
/// `None` fields are omitted from the request body entirely; the backend
/// treats absence as "no filter".
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
}

/// One dispute row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: String,
    pub username: String,
    pub order_id: String,
    pub reason: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Agent Token Balances
// =============================================================================

/// One agent's remaining balance for a model.
///
/// Served by the cookie-authenticated `POST /view_agent_tokens`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTokenBalance {
    pub username: String,
    pub model_id: String,
    pub tokens_remaining: i64,
}

// =============================================================================
// Model Pricing
// =============================================================================

/// One row of the AI models pricing table.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPricingDto {
    pub model_id: String,
    pub model_name: String,
    /// Decimal rupees per token, e.g. 0.00025.
    pub rate_per_token: f64,
    pub is_active: bool,
}

impl From<ModelPricingDto> for ModelPrice {
    fn from(dto: ModelPricingDto) -> Self {
        ModelPrice {
            model_id: dto.model_id,
            model_name: dto.model_name,
            // rupees/token → millipaise/token: ×100 (paise) ×1000 (milli)
            rate_millipaise: (dto.rate_per_token * 100_000.0).round() as i64,
            is_active: dto.is_active,
        }
    }
}

// =============================================================================
// Razorpay Orders
// =============================================================================

/// Request body for `POST /create_order`.
///
/// Razorpay order amounts are already integer paise on the wire, so no
/// decimal conversion happens here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Order total in paise.
    pub amount: i64,
    /// ISO currency code; always "INR" today.
    pub currency: String,
    /// Merchant-side receipt identifier.
    pub receipt: String,
}

impl CreateOrderRequest {
    /// Builds an INR order request from a final total.
    pub fn inr(total: quanta_core::Money, receipt: impl Into<String>) -> Self {
        CreateOrderRequest {
            amount: total.paise(),
            currency: "INR".to_string(),
            receipt: receipt.into(),
        }
    }
}

/// A created Razorpay order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::Money;

    #[test]
    fn test_rupees_to_paise() {
        assert_eq!(rupees_to_paise(10.0), 1000);
        assert_eq!(rupees_to_paise(10.99), 1099);
        assert_eq!(rupees_to_paise(0.005), 1); // rounds up
        assert_eq!(rupees_to_paise(0.0), 0);
    }

    #[test]
    fn test_percent_to_bps() {
        assert_eq!(percent_to_bps(10.0), 1000);
        assert_eq!(percent_to_bps(8.25), 825);
    }

    #[test]
    fn test_coupon_dto_conversion() {
        let json = r#"{
            "code": "SAVE10",
            "discountType": "percentage",
            "discountValue": 10,
            "minAmount": 1.0,
            "description": "10% off"
        }"#;
        let dto: CouponDto = serde_json::from_str(json).unwrap();
        let coupon: CouponDefinition = dto.into();

        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.discount_value, 1000); // bps
        assert_eq!(coupon.min_amount_paise, 100);
        assert_eq!(coupon.discount_for(Money::from_paise(1000)).paise(), 100);
    }

    #[test]
    fn test_flat_coupon_dto_converts_to_paise() {
        let json = r#"{
            "code": "FLAT50",
            "discountType": "flat",
            "discountValue": 50.0,
            "minAmount": 200.0
        }"#;
        let dto: CouponDto = serde_json::from_str(json).unwrap();
        let coupon: CouponDefinition = dto.into();

        assert_eq!(coupon.discount_value, 5000); // ₹50 in paise
        assert_eq!(coupon.min_amount_paise, 20000);
        assert_eq!(coupon.description, "");
    }

    #[test]
    fn test_base_discount_levels_conversion() {
        let json = r#"{
            "levels": [
                { "minOrderValue": 1000.0, "maxOrderValue": null,
                  "discountType": "percentage", "discountValue": 10 },
                { "minOrderValue": 500.0, "maxOrderValue": 1000.0,
                  "discountType": "percentage", "discountValue": 5 }
            ]
        }"#;
        let data: BaseDiscountData = serde_json::from_str(json).unwrap();
        let schedule: BaseDiscountSchedule = data.into();

        assert_eq!(schedule.levels.len(), 2);
        // levels come back sorted by lower bound
        assert_eq!(schedule.levels[0].min_order_value_paise, 50_000);
        assert_eq!(schedule.discount_for(Money::from_paise(100_000)).paise(), 10_000);
    }

    #[test]
    fn test_model_pricing_conversion() {
        let json = r#"{
            "modelId": "gpt-4o",
            "modelName": "GPT-4o",
            "ratePerToken": 0.00025,
            "isActive": true
        }"#;
        let dto: ModelPricingDto = serde_json::from_str(json).unwrap();
        let model: ModelPrice = dto.into();

        assert_eq!(model.rate_millipaise, 25);
        assert_eq!(model.rate().price_for(100_000).paise(), 2500);
    }

    #[test]
    fn test_dispute_filter_omits_none() {
        let filter = DisputeFilter {
            username: Some("agent_7".into()),
            resolved: None,
        };
        let body = serde_json::to_string(&filter).unwrap();
        assert_eq!(body, r#"{"username":"agent_7"}"#);

        let empty = DisputeFilter::default();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }

    #[test]
    fn test_create_order_request() {
        let req = CreateOrderRequest::inr(Money::from_paise(37_500), "rcpt-001");
        let body = serde_json::to_string(&req).unwrap();
        assert_eq!(
            body,
            r#"{"amount":37500,"currency":"INR","receipt":"rcpt-001"}"#
        );
    }
}
