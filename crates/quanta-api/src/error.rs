//! # API Error Types
//!
//! Error types for backend communication.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌──────────────────┐  ┌───────────────────────┐  │
//! │  │    Transport    │  │     Response     │  │     Configuration     │  │
//! │  │                 │  │                  │  │                       │  │
//! │  │  NetworkFailure │  │ MalformedResponse│  │  InvalidBaseUrl       │  │
//! │  │  (DNS, TLS,     │  │ (missing success │  │                       │  │
//! │  │   timeout, ...) │  │  flag or fields) │  │                       │  │
//! │  │                 │  │ Backend          │  │                       │  │
//! │  │                 │  │ (success=false)  │  │                       │  │
//! │  └─────────────────┘  └──────────────────┘  └───────────────────────┘  │
//! │                                                                         │
//! │  None are fatal to the page: errors are logged and surfaced inline,    │
//! │  and the user may re-trigger the action. There is no automatic retry.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Backend communication errors.
///
/// ## Design Principles
/// - Each variant names the endpoint where useful for debugging
/// - Errors are categorized for different UI treatments (toast vs inline)
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, DNS, TLS, timeout.
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// The response body did not match the expected envelope shape.
    ///
    /// ## When This Occurs
    /// - Response is not JSON at all (proxy error page)
    /// - The `success` flag is missing
    /// - `success` is true but `data` is missing
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// The backend reported `success: false`.
    #[error("Backend error from {endpoint}: {message}")]
    Backend { endpoint: String, message: String },

    /// The configured base URL could not be parsed or joined.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Returns true if this error is a transport-level failure.
    ///
    /// Transport failures get a "check your connection" toast; the rest get
    /// an inline message near the triggering control.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::NetworkFailure(_))
    }

    /// Returns true if the backend answered but with an unusable body.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ApiError::MalformedResponse { .. })
    }
}
