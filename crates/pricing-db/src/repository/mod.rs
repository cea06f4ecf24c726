//! # Repository Module
//!
//! Database repository implementations for the price store.
//!
//! ## Store Capabilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PriceService (pricing-core)                                           │
//! │       │                                  │                              │
//! │       │ PriceCandidateSource             │ PriceMatchSource             │
//! │       ▼                                  ▼                              │
//! │  PriceRepository                                                       │
//! │  ├── list_candidates(product, brand)   all rows, id order              │
//! │  ├── find_best_match(query)            ORDER BY priority DESC LIMIT 1  │
//! │  ├── insert / insert_all               validated writes                │
//! │  └── count / delete_all                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite `prices` table                                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod price;
