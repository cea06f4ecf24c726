//! # Validation Module
//!
//! Data-integrity checks for price rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP adapter                                                 │
//! │  └── Query parameter parsing (dateTime, productId, brandId)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store ingestion (pricing-db insert, seed)                    │
//! │  └── THIS MODULE: rule-level checks before a row is written            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── CHECK (start_date <= end_date) on YYYY-MM-DD text (years 0-9999)  │
//! │                                                                         │
//! │  The resolver still skips malformed rules it is handed anyway.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDateTime};
use std::ops::RangeInclusive;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PriceRule;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Years whose instants format as fixed-width `YYYY-...` text.
const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// Validates a validity window: both ends storable, start not after end.
///
/// A single-instant window (`from == to`) is valid.
pub fn validate_rule_window(from: NaiveDateTime, to: NaiveDateTime) -> ValidationResult<()> {
    validate_storable_instant("valid_from", from)?;
    validate_storable_instant("valid_to", to)?;

    if from > to {
        return Err(ValidationError::InvertedWindow { from, to });
    }

    Ok(())
}

/// Rejects instants whose text form would not sort chronologically
/// (`+10000-01-01`, `-0001-12-31`).
pub fn validate_storable_instant(field: &str, instant: NaiveDateTime) -> ValidationResult<()> {
    if !STORABLE_YEARS.contains(&instant.year()) {
        return Err(ValidationError::InstantOutOfRange {
            field: field.to_string(),
            instant,
        });
    }

    Ok(())
}

/// Validates an integer key (brand, product, price list). Keys are positive.
pub fn validate_id(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a price amount. Zero is allowed (free items), negatives are not.
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates every field of a rule that the type system does not already enforce.
///
/// ## Example
/// ```rust,ignore
/// validate_rule(&rule)?; // before PriceRepository::insert writes it
/// ```
pub fn validate_rule(rule: &PriceRule) -> ValidationResult<()> {
    validate_id("brand_id", rule.brand_id.get())?;
    validate_id("product_id", rule.product_id.get())?;
    validate_id("price_list_id", rule.price_list_id.get())?;
    validate_rule_window(rule.valid_from, rule.valid_to)?;
    validate_amount(rule.amount)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
