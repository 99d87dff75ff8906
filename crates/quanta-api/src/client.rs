//! # Backend API Client
//!
//! Thin typed wrapper around the platform backend's JSON endpoints.
//!
//! ## Request Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every call is:                                                         │
//! │                                                                         │
//! │  POST <base_url>/<path>                                                 │
//! │    Content-Type: application/json                                       │
//! │    X-Request-Id: <uuid v4>            (log correlation)                 │
//! │    Authorization: Bearer <token>      (bearer mode only)                │
//! │    Cookie: <session>                  (cookie mode, via cookie store)   │
//! │                                                                         │
//! │  Response: { "success": bool, "data": ..., "message"?: ... }            │
//! │                                                                         │
//! │  success missing  → MalformedResponse                                   │
//! │  success = false  → Backend { message }                                 │
//! │  data missing     → MalformedResponse                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no retry or backoff here: a failed fetch is
//! terminal for that user action, and the admin panel re-triggers on demand.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use quanta_core::types::{BaseDiscountSchedule, ModelPrice, Offer};
use quanta_core::validation::validate_username;

use crate::error::{ApiError, ApiResult};
use crate::types::{
    AgentTokenBalance, BaseDiscountData, CreateOrderRequest, Dispute, DisputeFilter, Envelope,
    ModelPricingDto, OfferDto, RazorpayOrder, UserCoupons, UserCouponsData,
};

// =============================================================================
// Client Configuration
// =============================================================================

/// How requests authenticate against the backend.
///
/// The client never ISSUES credentials; it only carries what the admin panel
/// session already has.
#[derive(Debug, Clone, Default)]
pub enum AuthMode {
    /// Session cookie, maintained by the client's cookie store.
    /// Used by `view_agent_tokens` and the admin endpoints.
    #[default]
    CookieSession,

    /// Bearer token in the `Authorization` header.
    Bearer(String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. "https://api.example.com".
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Authentication mode.
    pub auth: AuthMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            auth: AuthMode::CookieSession,
        }
    }
}

// =============================================================================
// API Client
// =============================================================================

/// Typed client for the platform backend.
///
/// One method per endpoint; every method converts wire DTOs into domain
/// types at the boundary so callers never touch raw JSON.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    auth: AuthMode,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;

        Ok(ApiClient {
            http,
            base_url,
            auth: config.auth,
        })
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// `POST /base_discount` - the tiered base discount schedule.
    pub async fn base_discount_levels(&self) -> ApiResult<BaseDiscountSchedule> {
        let data: BaseDiscountData = self
            .post("base_discount", &[], &serde_json::json!({}))
            .await?;
        Ok(data.into())
    }

    /// `POST /admin/offers?action=get` - all admin-configured offers.
    pub async fn offers(&self) -> ApiResult<Vec<Offer>> {
        let dtos: Vec<OfferDto> = self
            .post("admin/offers", &[("action", "get")], &serde_json::json!({}))
            .await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    /// `POST /admin/get_user_coupons?username=<..>` - a user's coupon
    /// entitlements, used to hydrate the coupon registry.
    pub async fn user_coupons(&self, username: &str) -> ApiResult<UserCoupons> {
        let username = validate_username(username).map_err(|e| ApiError::MalformedResponse {
            endpoint: "admin/get_user_coupons".to_string(),
            reason: e.to_string(),
        })?;

        let data: UserCouponsData = self
            .post(
                "admin/get_user_coupons",
                &[("username", username.as_str())],
                &serde_json::json!({}),
            )
            .await?;
        Ok(data.into())
    }

    /// `POST /admin/fetch_disputes` - dispute list with optional filters.
    pub async fn disputes(&self, filter: &DisputeFilter) -> ApiResult<Vec<Dispute>> {
        self.post("admin/fetch_disputes", &[], filter).await
    }

    /// `POST /view_agent_tokens` - per-agent token balances.
    /// Cookie-authenticated; fails with a backend error when no session
    /// cookie is present.
    pub async fn agent_tokens(&self) -> ApiResult<Vec<AgentTokenBalance>> {
        self.post("view_agent_tokens", &[], &serde_json::json!({}))
            .await
    }

    /// `POST /AI_models_pricing_data` - the per-model token pricing table.
    pub async fn model_pricing(&self) -> ApiResult<Vec<ModelPrice>> {
        let dtos: Vec<ModelPricingDto> = self
            .post("AI_models_pricing_data", &[], &serde_json::json!({}))
            .await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    /// `POST /create_order` - creates a Razorpay order for the final total.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> ApiResult<RazorpayOrder> {
        self.post("create_order", &[], request).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Sends a POST with a JSON body and unwraps the response envelope.
    async fn post<B, T>(&self, path: &str, query: &[(&str, &str)], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        let request_id = Uuid::new_v4();

        debug!(%request_id, path, "backend request");

        let mut request = self
            .http
            .post(url)
            .header("X-Request-Id", request_id.to_string())
            .json(body);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let AuthMode::Bearer(token) = &self.auth {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let result = parse_envelope(path, &text);
        if let Err(ref err) = result {
            warn!(%request_id, path, %status, error = %err, "backend request failed");
        }
        result
    }
}

/// Unwraps the `{ success, data, message }` envelope.
///
/// Split out of the async path so envelope handling is testable without a
/// server.
pub(crate) fn parse_envelope<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: format!("invalid JSON: {}", e),
        })?;

    match envelope.success {
        None => Err(ApiError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: "missing success flag".to_string(),
        }),
        Some(false) => Err(ApiError::Backend {
            endpoint: endpoint.to_string(),
            message: envelope
                .message
                .unwrap_or_else(|| "unspecified error".to_string()),
        }),
        Some(true) => envelope.data.ok_or_else(|| ApiError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: "success response without data".to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::types::CouponDefinition;

    #[test]
    fn test_parse_envelope_happy_path() {
        let body = r#"{
            "success": true,
            "data": {
                "username": "agent_7",
                "availableCoupons": [
                    { "code": "SAVE10", "discountType": "percentage",
                      "discountValue": 10, "minAmount": 1.0 }
                ],
                "offersUsed": 2
            }
        }"#;
        let data: UserCouponsData = parse_envelope("admin/get_user_coupons", body).unwrap();
        let coupons: UserCoupons = data.into();

        assert_eq!(coupons.username, "agent_7");
        assert_eq!(coupons.offers_used, 2);
        let coupon: &CouponDefinition = &coupons.available_coupons[0];
        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.discount_value, 1000);
    }

    #[test]
    fn test_parse_envelope_missing_success_flag() {
        let body = r#"{ "data": [] }"#;
        let err = parse_envelope::<Vec<Dispute>>("admin/fetch_disputes", body).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("missing success flag"));
    }

    #[test]
    fn test_parse_envelope_backend_failure() {
        let body = r#"{ "success": false, "message": "session expired" }"#;
        let err = parse_envelope::<Vec<Dispute>>("view_agent_tokens", body).unwrap_err();
        assert!(matches!(err, ApiError::Backend { message, .. } if message == "session expired"));
    }

    #[test]
    fn test_parse_envelope_success_without_data() {
        let body = r#"{ "success": true }"#;
        let err = parse_envelope::<Vec<Dispute>>("admin/fetch_disputes", body).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_envelope_not_json() {
        let body = "<html>502 Bad Gateway</html>";
        let err = parse_envelope::<Vec<Dispute>>("base_discount", body).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ApiClient::new(config),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
