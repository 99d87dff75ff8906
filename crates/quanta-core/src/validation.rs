//! # Validation Module
//!
//! Input validation utilities for Quanta Checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (admin panel JS)                                    │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Business rule validation before pricing logic runs                │
//! │  └── Typed errors the session layer can surface inline                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Authoritative checks on order creation                            │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_COUPON_CODE_LEN, MAX_TOKENS_PER_ORDER};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a coupon code, returning the trimmed code for registry lookup.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Uppercase letters and digits only (codes are case-sensitive uppercase;
///   lowercase input is rejected, not normalized)
/// - Surrounding whitespace is trimmed, not rejected; callers must look up
///   the returned code, not their raw input
///
/// ## Example
/// ```rust
/// use quanta_core::validation::validate_coupon_code;
///
/// assert_eq!(validate_coupon_code(" SAVE10 ").unwrap(), "SAVE10");
/// assert!(validate_coupon_code("save10").is_err());
/// assert!(validate_coupon_code("").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> ValidationResult<&str> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    Ok(code)
}

/// Validates a username for coupon/dispute lookups.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
pub fn validate_username(username: &str) -> ValidationResult<String> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 64,
        });
    }

    Ok(username.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a token count for an order.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_TOKENS_PER_ORDER
///
/// ## User Workflow
/// ```text
/// User types token count: 50000
///      │
///      ▼
/// validate_token_count(50000) ← THIS FUNCTION
///      │
///      ├── count <= 0?  → Error: "tokens must be positive"
///      ├── count > max? → Error: out of range
///      └── OK → debounced recalculation proceeds
/// ```
pub fn validate_token_count(tokens: i64) -> ValidationResult<()> {
    if tokens <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "tokens".to_string(),
        });
    }

    if tokens > MAX_TOKENS_PER_ORDER {
        return Err(ValidationError::OutOfRange {
            field: "tokens".to_string(),
            min: 1,
            max: MAX_TOKENS_PER_ORDER,
        });
    }

    Ok(())
}

/// Validates a per-token rate in millipaise.
///
/// Zero is allowed: promotional free-token models exist.
pub fn validate_rate_millipaise(millipaise: i64) -> ValidationResult<()> {
    if millipaise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage discount value in basis points.
///
/// ## Rules
/// - Must be between 1 and 10000 (0.01% to 100%)
pub fn validate_discount_bps(bps: i64) -> ValidationResult<()> {
    if bps <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "discount".to_string(),
        });
    }

    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 1,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("SAVE10").is_ok());
        assert!(validate_coupon_code("WELCOME15").is_ok());
        assert!(validate_coupon_code("FLAT50").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("   ").is_err());
        assert!(validate_coupon_code("save10").is_err());
        assert!(validate_coupon_code("SAVE-10").is_err());
        assert!(validate_coupon_code(&"A".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_coupon_code_returns_trimmed() {
        assert_eq!(validate_coupon_code("SAVE10").unwrap(), "SAVE10");
        assert_eq!(validate_coupon_code("  SAVE10 ").unwrap(), "SAVE10");
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("  agent_7 ").unwrap(), "agent_7");
        assert!(validate_username("").is_err());
        assert!(validate_username(&"a".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_token_count() {
        assert!(validate_token_count(1).is_ok());
        assert!(validate_token_count(MAX_TOKENS_PER_ORDER).is_ok());

        assert!(validate_token_count(0).is_err());
        assert!(validate_token_count(-5).is_err());
        assert!(validate_token_count(MAX_TOKENS_PER_ORDER + 1).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate_millipaise(0).is_ok());
        assert!(validate_rate_millipaise(25).is_ok());
        assert!(validate_rate_millipaise(-1).is_err());
    }

    #[test]
    fn test_validate_discount_bps() {
        assert!(validate_discount_bps(1000).is_ok());
        assert!(validate_discount_bps(10_000).is_ok());
        assert!(validate_discount_bps(0).is_err());
        assert!(validate_discount_bps(10_001).is_err());
    }
}
