//! # Session Error Types
//!
//! The error surface the admin panel sees. Wraps the lower layers' typed
//! errors and adds session-only failures (config, stale responses).

use thiserror::Error;

use quanta_api::ApiError;
use quanta_core::PricingError;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-level errors.
///
/// ## Design Principles
/// - Pricing and API errors pass through unchanged so the frontend can match
///   on the underlying variant
/// - None are fatal to the page; the user may re-trigger the action
#[derive(Debug, Error)]
pub enum SessionError {
    /// A pricing/discount rule was violated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Invalid session configuration.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// A fetch response arrived after a newer request was issued and was
    /// dropped without touching session state.
    #[error("Response for request {ticket} superseded by request {latest}")]
    StaleResponse { ticket: u64, latest: u64 },
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(err: toml::de::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SessionError {
    fn from(err: toml::ser::Error) -> Self {
        SessionError::ConfigSaveFailed(err.to_string())
    }
}

impl SessionError {
    /// Returns true if the error means the response was discarded on
    /// purpose (not a user-visible failure).
    pub fn is_stale(&self) -> bool {
        matches!(self, SessionError::StaleResponse { .. })
    }
}
