//! # Price Service
//!
//! The resolution contract exposed to callers (HTTP handlers, CLIs, tests).
//!
//! ## Two Paths, One Answer
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find_applicable_price (production path)                                │
//! │      PriceCandidateSource::list_candidates ──► resolver::resolve        │
//! │                                                                         │
//! │  find_applicable_price_via_store                                        │
//! │      PriceMatchSource::find_best_match ──► None → PriceNotFound         │
//! │                                                                         │
//! │  For the same rule universe both return the same rule.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service holds no state of its own beyond the store handles: it is
//! cheap to clone and safe to share across tasks.

use std::sync::Arc;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::resolver::{resolve_detailed, Resolution};
use crate::store::{PriceCandidateSource, PriceMatchSource};
use crate::types::{PriceQuery, PriceRule};

/// Entry point for price resolution.
///
/// ## Usage
/// ```rust,ignore
/// let service = PriceService::from_store(Arc::new(db.prices()));
/// let rule = service.find_applicable_price(&query).await?;
/// ```
#[derive(Clone, Default)]
pub struct PriceService {
    candidates: Option<Arc<dyn PriceCandidateSource>>,
    matcher: Option<Arc<dyn PriceMatchSource>>,
}

impl PriceService {
    /// Creates a service with no store attached.
    pub fn new() -> Self {
        PriceService::default()
    }

    /// Wires a store that provides both capabilities.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PriceCandidateSource + PriceMatchSource + 'static,
    {
        PriceService {
            candidates: Some(store.clone()),
            matcher: Some(store),
        }
    }

    /// Sets the candidate source used by [`find_applicable_price`](Self::find_applicable_price).
    pub fn with_candidate_source(mut self, source: Arc<dyn PriceCandidateSource>) -> Self {
        self.candidates = Some(source);
        self
    }

    /// Sets the matcher used by [`find_applicable_price_via_store`](Self::find_applicable_price_via_store).
    pub fn with_match_source(mut self, source: Arc<dyn PriceMatchSource>) -> Self {
        self.matcher = Some(source);
        self
    }

    /// Lists candidates and resolves them in-process.
    pub async fn find_applicable_price(&self, query: &PriceQuery) -> CoreResult<PriceRule> {
        self.find_applicable_price_detailed(query)
            .await
            .map(|resolution| resolution.rule)
    }

    /// Like [`find_applicable_price`](Self::find_applicable_price), keeping the tie report.
    pub async fn find_applicable_price_detailed(
        &self,
        query: &PriceQuery,
    ) -> CoreResult<Resolution> {
        let source = self
            .candidates
            .as_ref()
            .ok_or(CoreError::StoreUnavailable("candidate listing"))?;

        let candidates = source
            .list_candidates(query.product_id, query.brand_id)
            .await?;

        debug!(
            product_id = %query.product_id,
            brand_id = %query.brand_id,
            instant = %query.instant,
            candidates = candidates.len(),
            "Resolving price from candidates"
        );

        let resolution = resolve_detailed(query, &candidates)?;

        debug!(
            price_list = %resolution.rule.price_list_id,
            priority = resolution.rule.priority,
            "Price resolved"
        );

        Ok(resolution)
    }

    /// Delegates containment and priority selection to the store.
    pub async fn find_applicable_price_via_store(
        &self,
        query: &PriceQuery,
    ) -> CoreResult<PriceRule> {
        let matcher = self
            .matcher
            .as_ref()
            .ok_or(CoreError::StoreUnavailable("best-match lookup"))?;

        let rule = matcher
            .find_best_match(query)
            .await?
            .ok_or_else(|| CoreError::not_found(query.product_id, query.brand_id))?;

        debug!(
            product_id = %query.product_id,
            brand_id = %query.brand_id,
            price_list = %rule.price_list_id,
            "Price resolved by store"
        );

        Ok(rule)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, fixture_rules, rule, BRAND, PRODUCT};
    use crate::store::InMemoryPriceStore;
    use crate::types::{BrandId, ProductId};
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDateTime};

    fn service(rules: Vec<PriceRule>) -> PriceService {
        PriceService::from_store(Arc::new(InMemoryPriceStore::new(rules)))
    }

    struct BrokenStore;

    #[async_trait]
    impl PriceCandidateSource for BrokenStore {
        async fn list_candidates(
            &self,
            _product_id: ProductId,
            _brand_id: BrandId,
        ) -> CoreResult<Vec<PriceRule>> {
            Err(CoreError::Store("connection refused".to_string()))
        }
    }

    /// Deterministic pseudo-random rule sets with plenty of overlap and ties.
    fn generated_rules(seed: u64, count: usize) -> Vec<PriceRule> {
        let mut state = seed;
        let mut next = move |bound: u64| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % bound
        };

        let origin = at(2020, 6, 1, 0, 0, 0);
        (0..count)
            .map(|i| {
                let start = origin + Duration::hours(next(240) as i64);
                let end = start + Duration::hours(next(120) as i64);
                let priority = next(3) as i32;
                rule(i as i64 + 1, start, end, priority, 100 + i as i64)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_both_paths_on_fixture() {
        let svc = service(fixture_rules());
        let cases = [
            (at(2020, 6, 14, 10, 0, 0), 1),
            (at(2020, 6, 14, 16, 0, 0), 2),
            (at(2020, 6, 14, 21, 0, 0), 1),
            (at(2020, 6, 15, 10, 0, 0), 3),
            (at(2020, 6, 16, 21, 0, 0), 4),
        ];

        for (instant, list) in cases {
            let q = PriceQuery::new(instant, PRODUCT, BRAND);
            let v2 = svc.find_applicable_price(&q).await.unwrap();
            let v1 = svc.find_applicable_price_via_store(&q).await.unwrap();
            assert_eq!(v2.price_list_id.get(), list, "at {instant}");
            assert_eq!(v1, v2, "at {instant}");
        }
    }

    #[tokio::test]
    async fn test_both_paths_report_not_found() {
        let svc = service(fixture_rules());
        let q = PriceQuery::new(at(2019, 6, 14, 10, 0, 0), PRODUCT, BRAND);

        let v2 = svc.find_applicable_price(&q).await.unwrap_err();
        let v1 = svc.find_applicable_price_via_store(&q).await.unwrap_err();
        assert_eq!(v1.to_string(), v2.to_string());
        assert!(v1.is_not_found());

        let unknown_brand = PriceQuery::new(at(2020, 6, 14, 10, 0, 0), PRODUCT, BrandId::new(99));
        let err = svc.find_applicable_price(&unknown_brand).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "No applicable price found for product ID 35455 and brand ID 99"
        );
    }

    #[tokio::test]
    async fn test_cross_contract_equivalence_on_generated_sets() {
        for seed in 1..=20u64 {
            let svc = service(generated_rules(seed, 12));
            let mut instant: NaiveDateTime = at(2020, 5, 31, 0, 0, 0);
            let end = at(2020, 6, 17, 0, 0, 0);

            while instant <= end {
                let q = PriceQuery::new(instant, PRODUCT, BRAND);
                let v2 = svc.find_applicable_price(&q).await;
                let v1 = svc.find_applicable_price_via_store(&q).await;
                match (v1, v2) {
                    (Ok(a), Ok(b)) => assert_eq!(a, b, "seed {seed} at {instant}"),
                    (Err(a), Err(b)) => {
                        assert!(a.is_not_found() && b.is_not_found(), "seed {seed}")
                    }
                    (a, b) => panic!("paths disagree for seed {seed} at {instant}: {a:?} vs {b:?}"),
                }
                instant += Duration::minutes(270);
            }
        }
    }

    #[tokio::test]
    async fn test_detailed_reports_ties() {
        let from = at(2020, 1, 1, 0, 0, 0);
        let to = at(2020, 12, 31, 0, 0, 0);
        let svc = service(vec![rule(31, from, to, 2, 100), rule(32, from, to, 2, 200)]);

        let q = PriceQuery::new(at(2020, 3, 1, 0, 0, 0), PRODUCT, BRAND);
        let resolution = svc.find_applicable_price_detailed(&q).await.unwrap();
        assert_eq!(resolution.rule.price_list_id.get(), 31);
        assert!(resolution.is_tied());
    }

    #[tokio::test]
    async fn test_missing_capability() {
        let svc = PriceService::new();
        let q = PriceQuery::new(at(2020, 6, 14, 10, 0, 0), PRODUCT, BRAND);

        assert!(matches!(
            svc.find_applicable_price(&q).await,
            Err(CoreError::StoreUnavailable(_))
        ));
        assert!(matches!(
            svc.find_applicable_price_via_store(&q).await,
            Err(CoreError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_store_errors_are_not_not_found() {
        let svc = PriceService::new().with_candidate_source(Arc::new(BrokenStore));
        let q = PriceQuery::new(at(2020, 6, 14, 10, 0, 0), PRODUCT, BRAND);

        let err = svc.find_applicable_price(&q).await.unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_match_source_only() {
        let store = Arc::new(InMemoryPriceStore::new(fixture_rules()));
        let svc = PriceService::new().with_match_source(store);
        let q = PriceQuery::new(at(2020, 6, 16, 21, 0, 0), PRODUCT, BRAND);

        let rule = svc.find_applicable_price_via_store(&q).await.unwrap();
        assert_eq!(rule.amount.to_string(), "38.95");
    }
}
