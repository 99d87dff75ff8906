//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `TokenRate` type for per-token prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 10% coupon on ₹33.33 must not produce ₹3.3330000000000002.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹10.00 = 1000 paise, 10% of it = 100 paise, exactly.                │
//! │    Rounding happens once, explicitly, at the discount boundary.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quanta_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(1099); // ₹10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                        // ₹21.98
//! let total = price + Money::from_paise(500);     // ₹15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (the smallest INR unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  tokens × TokenRate ──► base_price ──► − base_discount                  │
/// │                                        − coupon/offer discount          │
/// │                                        ──► total_price (floored at 0)   │
/// │                                                                         │
/// │  total_price ──► Razorpay order amount (paise)                          │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use quanta_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // Represents ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    ///
    /// ## Why Paise?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The backend, calculations, and Razorpay orders all use paise.
    /// Only the UI converts to rupees for display.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use quanta_core::money::Money;
    ///
    /// let price = Money::from_rupees(10); // ₹10.00
    /// assert_eq!(price.paise(), 1000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    ///
    /// ## Example
    /// ```rust
    /// use quanta_core::money::Money;
    ///
    /// let price = Money::from_paise(1099);
    /// assert_eq!(price.rupees(), 10);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the smaller of two Money values.
    ///
    /// Used to cap flat discounts at the base price so a ₹50-off coupon on a
    /// ₹30 order discounts ₹30, not ₹50.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// ## Contract
    /// A total price must NEVER go negative. Every total computation in the
    /// pricing engine goes through this method rather than bare subtraction.
    ///
    /// ## Example
    /// ```rust
    /// use quanta_core::money::Money;
    ///
    /// let base = Money::from_paise(300);
    /// let discount = Money::from_paise(500);
    /// assert_eq!(base.sub_floor_zero(discount), Money::zero());
    /// ```
    #[inline]
    pub fn sub_floor_zero(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Computes a percentage of this amount, expressed in basis points.
    ///
    /// ## Basis Points Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  1 basis point = 0.01% = 1/10000                                    │
    /// │  1000 bps = 10%   (SAVE10)                                          │
    /// │  1500 bps = 15%   (WELCOME15)                                       │
    /// │                                                                     │
    /// │  Formula: amount_paise × bps / 10000                                │
    /// │  With rounding: (amount_paise × bps + 5000) / 10000                 │
    /// │                                                                     │
    /// │  Whole-percent coupons on whole-paise amounts divide exactly,       │
    /// │  so the rounding term only matters for fractional results.          │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use quanta_core::money::Money;
    ///
    /// let base = Money::from_paise(1000); // ₹10.00
    /// let discount = base.percentage_bps(1000); // 10%
    /// assert_eq!(discount.paise(), 100); // ₹1.00
    /// ```
    pub fn percentage_bps(&self, bps: u32) -> Money {
        // Use i128 to prevent overflow on large amounts
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_paise(part as i64)
    }
}

// =============================================================================
// Token Rate
// =============================================================================

/// Price per token, in millipaise (1/1000 paise).
///
/// ## Why Millipaise?
/// AI model tokens are priced at fractions of a paisa. A model charging
/// ₹0.00025 per token is 25 millipaise per token; an order of 100,000 tokens
/// prices to exactly 2,500 paise with no float drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenRate(i64);

impl TokenRate {
    /// Creates a rate from millipaise per token.
    #[inline]
    pub const fn from_millipaise(millipaise: i64) -> Self {
        TokenRate(millipaise)
    }

    /// Creates a rate from whole paise per token.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        TokenRate(paise * 1000)
    }

    /// Returns the rate in millipaise per token.
    #[inline]
    pub const fn millipaise(&self) -> i64 {
        self.0
    }

    /// Zero rate (no model selected yet).
    #[inline]
    pub const fn zero() -> Self {
        TokenRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes the price for a token count: `tokens × rate`, rounded to the
    /// nearest paisa.
    ///
    /// ## Example
    /// ```rust
    /// use quanta_core::money::TokenRate;
    ///
    /// let rate = TokenRate::from_millipaise(25); // ₹0.00025 per token
    /// let price = rate.price_for(100_000);
    /// assert_eq!(price.paise(), 2500); // ₹25.00
    /// ```
    pub fn price_for(&self, tokens: i64) -> Money {
        // i128 to prevent overflow: token counts reach the tens of millions
        let paise = (tokens as i128 * self.0 as i128 + 500) / 1000;
        Money::from_paise(paise as i64)
    }
}

impl Default for TokenRate {
    fn default() -> Self {
        TokenRate::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for diagnostics and discount summaries. Use frontend formatting
/// for actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
///
/// NOTE: bare subtraction may go negative. Totals must use
/// [`Money::sub_floor_zero`].
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
