//! # pricing-core: Temporal Price Resolution
//!
//! Answers "what price applies to product P of brand B at instant T?" when
//! several price-list entries overlap in time.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Price Resolver Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    price-api (HTTP adapter)                     │   │
//! │  │    GET /api/prices/v1   GET /api/prices/v2                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  types   │  │ resolver │  │  store   │  │   service    │   │   │
//! │  │   │PriceRule │  │ resolve  │  │  traits  │  │ PriceService │   │   │
//! │  │   │  Money   │  │ tie-break│  │ in-memory│  │  v1 / v2     │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pricing-db (SQLite store)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - PriceRule, PriceQuery, ids, currency code
//! - [`money`] - Exact minor-unit amounts
//! - [`error`] - Domain error types
//! - [`validation`] - Rule integrity checks
//! - [`resolver`] - The selection algorithm
//! - [`store`] - Store capability traits and the in-memory store
//! - [`service`] - The resolution contract callers use
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same query + same candidates = same rule
//! 2. **No I/O**: stores live behind traits, implemented elsewhere
//! 3. **Integer Money**: amounts are cents (i64), never floats
//! 4. **Explicit Errors**: "not found" is a `Result` variant

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod resolver;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod fixtures;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use resolver::{resolve, resolve_detailed, Resolution};
pub use service::PriceService;
pub use store::{InMemoryPriceStore, PriceCandidateSource, PriceMatchSource};
pub use types::*;
