//! # Error Types
//!
//! Domain-specific error types for quanta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quanta-core errors (this file)                                        │
//! │  ├── PricingError     - Coupon/offer/calculation failures              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quanta-api errors (separate crate)                                    │
//! │  └── ApiError         - Network and response failures                  │
//! │                                                                         │
//! │  quanta-session errors (separate crate)                                │
//! │  └── SessionError     - What the admin panel sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → SessionError → Frontend        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (coupon code, required minimum, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing and discount evaluation errors.
///
/// These errors represent business rule violations. They are surfaced inline
/// next to the coupon input; none are fatal and the user may retry.
#[derive(Debug, Error)]
pub enum PricingError {
    /// No pricing calculation exists yet.
    ///
    /// ## When This Occurs
    /// - Coupon entered before a token count/model was selected
    /// - Token input cleared back to zero, then coupon applied
    #[error("Calculate a price first before applying a discount")]
    NoActiveCalculation,

    /// The coupon code does not exist in the registry.
    ///
    /// ## User Workflow
    /// ```text
    /// Enter code "SAVE99"
    ///      │
    ///      ▼
    /// Registry lookup: not found
    ///      │
    ///      ▼
    /// UnknownCoupon { code: "SAVE99" }
    ///      │
    ///      ▼
    /// UI shows: "Invalid coupon code: SAVE99"
    /// ```
    #[error("Invalid coupon code: {code}")]
    UnknownCoupon { code: String },

    /// The order total is below the coupon's minimum purchase amount.
    ///
    /// Carries the required minimum so the UI can display it.
    #[error("Minimum order of {required} required (current order is {base_price})")]
    BelowMinimumAmount { required: Money, base_price: Money },

    /// The offer is disabled or past its validity window.
    #[error("Offer '{title}' is no longer active")]
    OfferNotActive { title: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before pricing logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., lowercase coupon code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::BelowMinimumAmount {
            required: Money::from_paise(20000),
            base_price: Money::from_paise(15000),
        };
        assert_eq!(
            err.to_string(),
            "Minimum order of ₹200.00 required (current order is ₹150.00)"
        );

        let err = PricingError::UnknownCoupon {
            code: "SAVE99".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid coupon code: SAVE99");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "coupon code".to_string(),
        };
        assert_eq!(err.to_string(), "coupon code is required");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "tokens".to_string(),
        };
        let pricing_err: PricingError = validation_err.into();
        assert!(matches!(pricing_err, PricingError::Validation(_)));
    }
}
