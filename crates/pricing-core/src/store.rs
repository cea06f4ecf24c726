//! # Store Capabilities
//!
//! The two ways a price store can serve the resolver.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PriceCandidateSource::list_candidates(product, brand)                  │
//! │      every rule of the product/brand, any window                        │
//! │      → resolver::resolve does containment + priority                    │
//! │                                                                         │
//! │  PriceMatchSource::find_best_match(query)                               │
//! │      the store does containment + priority itself                       │
//! │      → the service only turns None into PriceNotFound                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both must apply the same tie-break (first in insertion order among equal
//! top priority) so the two paths return the same rule.

use async_trait::async_trait;
use std::cmp::Reverse;

use crate::error::CoreResult;
use crate::types::{BrandId, PriceQuery, PriceRule, ProductId};

/// A store that hands over raw candidates.
#[async_trait]
pub trait PriceCandidateSource: Send + Sync {
    /// Returns every rule of the product/brand in insertion order.
    ///
    /// Must NOT filter by validity window.
    async fn list_candidates(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
    ) -> CoreResult<Vec<PriceRule>>;
}

/// A store that resolves by itself.
#[async_trait]
pub trait PriceMatchSource: Send + Sync {
    /// Returns the highest-priority rule active at the instant, or `None`.
    async fn find_best_match(&self, query: &PriceQuery) -> CoreResult<Option<PriceRule>>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// A `Vec`-backed store for tests and embedding.
///
/// Insertion order is the order candidates are listed in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceStore {
    rules: Vec<PriceRule>,
}

impl InMemoryPriceStore {
    pub fn new(rules: Vec<PriceRule>) -> Self {
        InMemoryPriceStore { rules }
    }

    /// Appends a rule after the existing ones.
    pub fn push(&mut self, rule: PriceRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[async_trait]
impl PriceCandidateSource for InMemoryPriceStore {
    async fn list_candidates(
        &self,
        product_id: ProductId,
        brand_id: BrandId,
    ) -> CoreResult<Vec<PriceRule>> {
        Ok(self
            .rules
            .iter()
            .filter(|rule| rule.belongs_to(product_id, brand_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PriceMatchSource for InMemoryPriceStore {
    async fn find_best_match(&self, query: &PriceQuery) -> CoreResult<Option<PriceRule>> {
        // ORDER BY priority DESC, insertion ASC LIMIT 1
        Ok(self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| {
                rule.belongs_to(query.product_id, query.brand_id)
                    && rule.is_well_formed()
                    && rule.is_active_at(query.instant)
            })
            .min_by_key(|(position, rule)| (Reverse(rule.priority), *position))
            .map(|(_, rule)| rule.clone()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
