//! # Error Types
//!
//! Domain-specific error types for pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricing-core errors (this file)                                       │
//! │  ├── CoreError        - Resolution and store-boundary failures         │
//! │  └── ValidationError  - Malformed rules or inputs                      │
//! │                                                                         │
//! │  pricing-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  price-api errors (app)                                                │
//! │  └── ApiError         - What HTTP callers see (JSON body)              │
//! │                                                                         │
//! │  Flow: DbError → CoreError::Store → ApiError → 500                     │
//! │        CoreError::PriceNotFound     → ApiError → 404                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the resolution key in messages (product ID, brand ID)
//! 3. "Not found" is a variant, never a panic or a sentinel value

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::types::{BrandId, ProductId};

// =============================================================================
// Core Error
// =============================================================================

/// Errors produced while resolving a price.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No candidate rule's validity window contains the query instant.
    ///
    /// ## When This Occurs
    /// - Zero candidates for the product/brand
    /// - Every candidate is outside its window at the instant
    /// - Every candidate active at the instant was malformed and skipped
    ///
    /// Unknown product, unknown brand and "no active rule" all collapse here.
    /// Telling them apart is the store's job, not the resolver's.
    #[error("No applicable price found for product ID {product_id} and brand ID {brand_id}")]
    PriceNotFound {
        product_id: ProductId,
        brand_id: BrandId,
    },

    /// The store collaborator failed (connection, query, decoding).
    #[error("Price store error: {0}")]
    Store(String),

    /// The service was built without the capability the caller asked for.
    #[error("Price store does not provide {0}")]
    StoreUnavailable(&'static str),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a PriceNotFound error for the given resolution key.
    pub fn not_found(product_id: ProductId, brand_id: BrandId) -> Self {
        CoreError::PriceNotFound {
            product_id,
            brand_id,
        }
    }

    /// Returns true for the "no applicable price" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::PriceNotFound { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input and data-integrity validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., bad decimal amount, bad currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Validity window ends before it starts.
    #[error("validity window is inverted: starts {from} but ends {to}")]
    InvertedWindow {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },

    /// Instant outside the four-digit years a store can order.
    #[error("{field} {instant} is outside years 0000-9999")]
    InstantOutOfRange {
        field: String,
        instant: NaiveDateTime,
    },
}

impl ValidationError {
    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
