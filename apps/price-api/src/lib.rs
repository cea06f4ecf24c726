//! # Price API
//!
//! HTTP server answering "which price applies to this product, of this
//! brand, at this instant?".
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Price API Server                               │
//! │                                                                         │
//! │  Client ───► axum (8080) ───► routes ───► PriceService ───► SQLite     │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                        ErrorResponse JSON                               │
//! │                     (404 / 400 / 500 mapping)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PRICE_API_PORT` - HTTP port (default: 8080)
//! - `PRICE_API_BIND` - Bind address (default: 0.0.0.0)
//! - `PRICE_DB_PATH` - SQLite database file (default: ./prices.db)
//! - `PRICE_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `RUST_LOG` - Log filter

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

use std::sync::Arc;

use pricing_core::PriceService;
use pricing_db::{Database, DbResult};

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use routes::app_router;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub service: PriceService,
}

impl AppState {
    /// Wires a price service backed by the database's price repository.
    pub fn new(db: Database) -> Self {
        let service = PriceService::from_store(Arc::new(db.prices()));
        AppState { db, service }
    }
}

/// Opens the database and builds the shared state.
pub async fn build_state(config: &ApiConfig) -> DbResult<Arc<AppState>> {
    let db = Database::new(config.db_config()).await?;
    Ok(Arc::new(AppState::new(db)))
}
