//! # Money Module
//!
//! Provides the `Money` type for price amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A price list entry of 35.50 EUR stored as f64:                         │
//! │    35.50 survives, but 25.45 becomes 25.449999999999999289...  ❌        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    "25.45" is parsed digit by digit into 2545 cents                    │
//! │    and rendered back as "25.45" with no drift                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::money::Money;
//!
//! let price: Money = "35.50".parse().unwrap();
//! assert_eq!(price.cents(), 3550);
//! assert_eq!(price.to_string(), "35.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

/// Maximum digits accepted after the decimal point.
const MAX_FRACTION_DIGITS: usize = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the smallest currency unit (cents for EUR).
///
/// The currency itself is carried next to the amount on
/// [`PriceRule`](crate::types::PriceRule); `Money` never converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    ///
    /// let price = Money::from_cents(2545);
    /// assert_eq!(price.to_string(), "25.45");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a plain decimal string such as `"35.50"`, `"35.5"` or `"-0.05"`.
    ///
    /// ## Rules
    /// - Optional leading `+` or `-`
    /// - At least one integer digit
    /// - At most two fraction digits (no silent rounding)
    /// - No exponent, no thousands separators
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, unsigned) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return Err(ValidationError::invalid_format(
                        "amount",
                        "decimal point must be followed by digits",
                    ));
                }
                (int_part, frac_part)
            }
            None => (unsigned, ""),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("'{}' is not a decimal number", input),
            ));
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("'{}' is not a decimal number", input),
            ));
        }
        if frac_part.len() > MAX_FRACTION_DIGITS {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("at most {} fraction digits allowed", MAX_FRACTION_DIGITS),
            ));
        }

        let overflow = || ValidationError::invalid_format("amount", "value out of range");

        let major: i64 = int_part.parse().map_err(|_| overflow())?;
        let mut minor: i64 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| overflow())?
        };
        // "35.5" means fifty cents, not five
        if frac_part.len() == 1 {
            minor *= 10;
        }

        let cents = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the plain decimal form (`35.50`), without any currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.major().abs(),
            self.minor_part()
        )
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
