//! # quanta-api: Backend Client for Quanta Checkout
//!
//! Typed HTTP/JSON client for the token-purchasing platform backend. This is
//! the only crate in the workspace that performs network I/O.
//!
//! ## Endpoints
//!
//! | Method | Purpose |
//! |---|---|
//! | [`ApiClient::base_discount_levels`] | tiered base discount schedule |
//! | [`ApiClient::offers`] | admin-configured offers |
//! | [`ApiClient::user_coupons`] | per-user coupon entitlements |
//! | [`ApiClient::disputes`] | dispute list with optional filters |
//! | [`ApiClient::agent_tokens`] | agent token balances (cookie auth) |
//! | [`ApiClient::model_pricing`] | AI model pricing table |
//! | [`ApiClient::create_order`] | Razorpay order creation |
//!
//! All requests are `POST` with `Content-Type: application/json` and the
//! `{ success, data, message }` envelope. Failures are terminal per user
//! action; there is no retry or backoff.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, AuthMode, ClientConfig};
pub use error::{ApiError, ApiResult};
pub use types::{
    AgentTokenBalance, CreateOrderRequest, Dispute, DisputeFilter, RazorpayOrder, UserCoupons,
};
