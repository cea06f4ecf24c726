//! # pricing-db: SQLite Price Store
//!
//! Persistent storage for price-list entries, using SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Price Lookup Data Flow                           │
//! │                                                                         │
//! │  HTTP handler (GET /api/prices/v1|v2)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PriceService (pricing-core)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   pricing-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (price.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ PriceRepo     │    │ 001_create   │  │   │
//! │  │   │ Connection    │    │               │    │ 002_seed     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (PRICE_DB_PATH) or :memory:                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The price repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pricing_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("prices.db")).await?;
//! let rule = db.prices().find_best_match(&query).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::price::PriceRepository;
