//! # Price Resolution
//!
//! Selects the single price rule that applies to a product of a brand at an
//! instant, out of a candidate set whose validity windows may overlap.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  candidates (input order)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  skip malformed (valid_from > valid_to) ──► warn! + Resolution report   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  keep valid_from <= instant <= valid_to   (both ends inclusive)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  running max on priority, strictly greater replaces                    │
//! │       │   equal priority keeps the EARLIER rule                        │
//! │       ▼                                                                 │
//! │  winner, or PriceNotFound { product_id, brand_id }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One pass, no sorting, no allocation beyond the report vectors.
//!
//! ## Tie-break
//! When several active rules share the top priority the first one in input
//! order wins. Stores that hand candidates over in insertion order therefore
//! favour the entry that was loaded first. The losing price lists are listed
//! in [`Resolution::tied_price_lists`] so callers can flag ambiguous data.

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::types::{PriceListId, PriceQuery, PriceRule};

/// Outcome of a successful resolution plus what was noticed on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The applicable rule.
    pub rule: PriceRule,

    /// Price lists of other active rules that had the same priority as the
    /// winner and lost on input order. Empty when the choice was unambiguous.
    pub tied_price_lists: Vec<PriceListId>,

    /// Price lists of rules skipped because their window was inverted.
    pub skipped_malformed: Vec<PriceListId>,
}

impl Resolution {
    /// True when another rule with the same priority was also active.
    pub fn is_tied(&self) -> bool {
        !self.tied_price_lists.is_empty()
    }
}

/// Resolves the applicable rule for `query` out of `candidates`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use pricing_core::{resolve, BrandId, Money, PriceListId, PriceQuery, PriceRule, ProductId};
///
/// let day = |d, h| NaiveDate::from_ymd_opt(2020, 6, d).unwrap().and_hms_opt(h, 0, 0).unwrap();
/// let base = PriceRule {
///     brand_id: BrandId::new(1),
///     product_id: ProductId::new(35455),
///     price_list_id: PriceListId::new(1),
///     valid_from: day(14, 0),
///     valid_to: day(30, 0),
///     priority: 0,
///     amount: Money::from_cents(3550),
///     currency: "EUR".parse().unwrap(),
/// };
/// let promo = PriceRule {
///     price_list_id: PriceListId::new(2),
///     valid_from: day(14, 15),
///     valid_to: day(14, 18),
///     priority: 1,
///     amount: Money::from_cents(2545),
///     ..base.clone()
/// };
///
/// let query = PriceQuery::new(day(14, 16), ProductId::new(35455), BrandId::new(1));
/// let rule = resolve(&query, &[base, promo]).unwrap();
/// assert_eq!(rule.price_list_id, PriceListId::new(2));
/// ```
pub fn resolve(query: &PriceQuery, candidates: &[PriceRule]) -> CoreResult<PriceRule> {
    resolve_detailed(query, candidates).map(|resolution| resolution.rule)
}

/// Same selection as [`resolve`], returning the tie and data-quality report.
pub fn resolve_detailed(query: &PriceQuery, candidates: &[PriceRule]) -> CoreResult<Resolution> {
    let mut best: Option<&PriceRule> = None;
    let mut tied_price_lists = Vec::new();
    let mut skipped_malformed = Vec::new();

    for candidate in candidates {
        if !candidate.belongs_to(query.product_id, query.brand_id) {
            debug!(
                price_list = %candidate.price_list_id,
                product_id = %candidate.product_id,
                brand_id = %candidate.brand_id,
                "Ignoring candidate for a different product/brand"
            );
            continue;
        }

        if !candidate.is_well_formed() {
            warn!(
                price_list = %candidate.price_list_id,
                product_id = %candidate.product_id,
                brand_id = %candidate.brand_id,
                valid_from = %candidate.valid_from,
                valid_to = %candidate.valid_to,
                "Skipping price rule with inverted validity window"
            );
            skipped_malformed.push(candidate.price_list_id);
            continue;
        }

        if !candidate.is_active_at(query.instant) {
            continue;
        }

        match best {
            Some(current) if candidate.priority > current.priority => {
                tied_price_lists.clear();
                best = Some(candidate);
            }
            Some(current) if candidate.priority == current.priority => {
                tied_price_lists.push(candidate.price_list_id);
            }
            Some(_) => {}
            None => best = Some(candidate),
        }
    }

    let rule = best
        .cloned()
        .ok_or_else(|| CoreError::not_found(query.product_id, query.brand_id))?;

    if !tied_price_lists.is_empty() {
        debug!(
            winner = %rule.price_list_id,
            priority = rule.priority,
            tied = ?tied_price_lists,
            "Equal-priority rules active; first in input order selected"
        );
    }

    Ok(Resolution {
        rule,
        tied_price_lists,
        skipped_malformed,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, fixture_rules, rule, BRAND, PRODUCT};
    use crate::types::{BrandId, ProductId};
    use chrono::Duration;

    fn query(instant: chrono::NaiveDateTime) -> PriceQuery {
        PriceQuery::new(instant, PRODUCT, BRAND)
    }

    #[test]
    fn test_fixture_scenario() {
        let rules = fixture_rules();
        let cases = [
            (at(2020, 6, 14, 10, 0, 0), 1, 3550),
            (at(2020, 6, 14, 16, 0, 0), 2, 2545),
            (at(2020, 6, 14, 21, 0, 0), 1, 3550),
            (at(2020, 6, 15, 10, 0, 0), 3, 3050),
            (at(2020, 6, 16, 21, 0, 0), 4, 3895),
        ];

        for (instant, list, cents) in cases {
            let selected = resolve(&query(instant), &rules).unwrap();
            assert_eq!(selected.price_list_id.get(), list, "at {instant}");
            assert_eq!(selected.amount.cents(), cents, "at {instant}");
            assert_eq!(selected.currency.as_str(), "EUR");
        }
    }

    #[test]
    fn test_before_any_window_is_not_found() {
        let err = resolve(&query(at(2019, 6, 14, 10, 0, 0)), &fixture_rules()).unwrap_err();
        match err {
            CoreError::PriceNotFound {
                product_id,
                brand_id,
            } => {
                assert_eq!(product_id, PRODUCT);
                assert_eq!(brand_id, BRAND);
            }
            other => panic!("expected PriceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_candidates_is_not_found() {
        let err = resolve(&query(at(2020, 6, 14, 10, 0, 0)), &[]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let from = at(2020, 6, 14, 15, 0, 0);
        let to = at(2020, 6, 14, 18, 30, 0);
        let rules = vec![rule(7, from, to, 3, 1000)];

        assert_eq!(resolve(&query(from), &rules).unwrap().price_list_id.get(), 7);
        assert_eq!(resolve(&query(to), &rules).unwrap().price_list_id.get(), 7);

        let epsilon = Duration::nanoseconds(1);
        assert!(resolve(&query(from - epsilon), &rules)
            .unwrap_err()
            .is_not_found());
        assert!(resolve(&query(to + epsilon), &rules)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_higher_priority_wins_regardless_of_order() {
        let from = at(2020, 1, 1, 0, 0, 0);
        let to = at(2020, 12, 31, 0, 0, 0);
        let low = rule(5, from, to, 5, 500);
        let high = rule(9, from, to, 9, 900);
        let instant = at(2020, 6, 1, 0, 0, 0);

        let forward = resolve(&query(instant), &[low.clone(), high.clone()]).unwrap();
        let backward = resolve(&query(instant), &[high, low]).unwrap();

        assert_eq!(forward.priority, 9);
        assert_eq!(backward.priority, 9);
    }

    #[test]
    fn test_equal_priority_prefers_first_in_input_order() {
        let from = at(2020, 1, 1, 0, 0, 0);
        let to = at(2020, 12, 31, 0, 0, 0);
        let first = rule(11, from, to, 5, 100);
        let second = rule(12, from, to, 5, 200);
        let instant = at(2020, 6, 1, 0, 0, 0);

        for _ in 0..3 {
            let resolution =
                resolve_detailed(&query(instant), &[first.clone(), second.clone()]).unwrap();
            assert_eq!(resolution.rule.price_list_id.get(), 11);
            assert_eq!(resolution.tied_price_lists, vec![PriceListId::new(12)]);
            assert!(resolution.is_tied());
        }

        let reversed = resolve(&query(instant), &[second, first]).unwrap();
        assert_eq!(reversed.price_list_id.get(), 12);
    }

    #[test]
    fn test_tie_report_resets_when_higher_priority_appears() {
        let from = at(2020, 1, 1, 0, 0, 0);
        let to = at(2020, 12, 31, 0, 0, 0);
        let rules = vec![
            rule(1, from, to, 1, 100),
            rule(2, from, to, 1, 200),
            rule(3, from, to, 2, 300),
        ];

        let resolution = resolve_detailed(&query(at(2020, 6, 1, 0, 0, 0)), &rules).unwrap();
        assert_eq!(resolution.rule.price_list_id.get(), 3);
        assert!(!resolution.is_tied());
    }

    #[test]
    fn test_malformed_rule_is_skipped_and_reported() {
        let instant = at(2020, 6, 1, 0, 0, 0);
        // inverted window that would otherwise "contain" nothing but carries top priority
        let malformed = rule(
            66,
            at(2020, 12, 31, 0, 0, 0),
            at(2020, 1, 1, 0, 0, 0),
            100,
            1,
        );
        let good = rule(1, at(2020, 1, 1, 0, 0, 0), at(2020, 12, 31, 0, 0, 0), 0, 3550);

        let resolution = resolve_detailed(&query(instant), &[malformed.clone(), good]).unwrap();
        assert_eq!(resolution.rule.price_list_id.get(), 1);
        assert_eq!(resolution.skipped_malformed, vec![PriceListId::new(66)]);

        let err = resolve(&query(instant), &[malformed]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_foreign_candidates_are_ignored() {
        let from = at(2020, 1, 1, 0, 0, 0);
        let to = at(2020, 12, 31, 0, 0, 0);
        let mut other_brand = rule(8, from, to, 50, 100);
        other_brand.brand_id = BrandId::new(2);
        let mut other_product = rule(9, from, to, 50, 100);
        other_product.product_id = ProductId::new(1);
        let own = rule(1, from, to, 0, 3550);

        let selected = resolve(
            &query(at(2020, 6, 1, 0, 0, 0)),
            &[other_brand, other_product, own],
        )
        .unwrap();
        assert_eq!(selected.price_list_id.get(), 1);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let rules = fixture_rules();
        let q = query(at(2020, 6, 14, 16, 0, 0));
        let first = resolve_detailed(&q, &rules).unwrap();
        for _ in 0..10 {
            assert_eq!(resolve_detailed(&q, &rules).unwrap(), first);
        }
    }
}
