//! # Domain Types
//!
//! Core domain types used throughout the price resolver.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │      PriceRule       │        │      PriceQuery      │              │
//! │  │  ──────────────────  │        │  ──────────────────  │              │
//! │  │  brand_id            │        │  instant             │              │
//! │  │  product_id          │        │  product_id          │              │
//! │  │  price_list_id       │        │  brand_id            │              │
//! │  │  valid_from/valid_to │        └──────────────────────┘              │
//! │  │  priority            │                                               │
//! │  │  amount (Money)      │        BrandId / ProductId / PriceListId      │
//! │  │  currency            │        opaque integer keys                    │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Instants are timezone-less (`NaiveDateTime`). Price lists are published in
//! the brand's local calendar and queried the same way.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        // Newtype structs already serialize as the bare integer
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub struct $name(i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                $name(id)
            }

            #[inline]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                $name(id)
            }
        }
    };
}

integer_id!(
    /// Identifier of the brand that owns a price list.
    BrandId
);
integer_id!(
    /// Identifier of the priced product.
    ProductId
);
integer_id!(
    /// Identifier of a price list. Reported for observability, never used to select.
    PriceListId
);

// =============================================================================
// Currency Code
// =============================================================================

/// ISO-style three-letter currency code (`EUR`, `USD`).
///
/// Carried opaquely: no conversion happens anywhere in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(ValidationError::Required {
                field: "currency".to_string(),
            });
        }
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ValidationError::invalid_format(
                "currency",
                format!("'{}' is not a three-letter uppercase code", code),
            ));
        }
        Ok(CurrencyCode(code.to_string()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Price Rule
// =============================================================================

/// One price-list entry: a price for a product of a brand, valid inside an
/// inclusive window, ranked by priority against overlapping entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceRule {
    /// Brand that owns the price list.
    pub brand_id: BrandId,

    /// Priced product.
    pub product_id: ProductId,

    /// Price list this entry belongs to.
    pub price_list_id: PriceListId,

    /// First instant at which the entry applies (inclusive).
    #[ts(as = "String")]
    pub valid_from: NaiveDateTime,

    /// Last instant at which the entry applies (inclusive).
    #[ts(as = "String")]
    pub valid_to: NaiveDateTime,

    /// Higher wins when several entries are active at once.
    pub priority: i32,

    /// Exact amount in minor units.
    pub amount: Money,

    /// Currency of `amount`.
    #[ts(as = "String")]
    pub currency: CurrencyCode,
}

impl PriceRule {
    /// True when `valid_from <= valid_to`.
    ///
    /// Rules failing this are data-integrity errors; the resolver skips them.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.valid_from <= self.valid_to
    }

    /// True when `instant` lies inside the window, both ends included.
    #[inline]
    pub fn is_active_at(&self, instant: NaiveDateTime) -> bool {
        self.valid_from <= instant && instant <= self.valid_to
    }

    /// True when the rule belongs to the given product and brand.
    #[inline]
    pub fn belongs_to(&self, product_id: ProductId, brand_id: BrandId) -> bool {
        self.product_id == product_id && self.brand_id == brand_id
    }
}

// =============================================================================
// Price Query
// =============================================================================

/// The resolution key: which product, which brand, at which instant.
///
/// Same key and same candidate set always give the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceQuery {
    pub instant: NaiveDateTime,
    pub product_id: ProductId,
    pub brand_id: BrandId,
}

impl PriceQuery {
    pub fn new(instant: NaiveDateTime, product_id: ProductId, brand_id: BrandId) -> Self {
        PriceQuery {
            instant,
            product_id,
            brand_id,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 6, day)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn rule(from: NaiveDateTime, to: NaiveDateTime) -> PriceRule {
        PriceRule {
            brand_id: BrandId::new(1),
            product_id: ProductId::new(35455),
            price_list_id: PriceListId::new(2),
            valid_from: from,
            valid_to: to,
            priority: 1,
            amount: Money::from_cents(2545),
            currency: "EUR".parse().unwrap(),
        }
    }

    #[test]
    fn test_window_is_inclusive() {
        let r = rule(at(14, 15, 0, 0), at(14, 18, 30, 0));
        assert!(r.is_active_at(at(14, 15, 0, 0)));
        assert!(r.is_active_at(at(14, 18, 30, 0)));
        assert!(!r.is_active_at(at(14, 14, 59, 59)));
        assert!(!r.is_active_at(at(14, 18, 30, 1)));
    }

    #[test]
    fn test_well_formed() {
        assert!(rule(at(14, 0, 0, 0), at(14, 0, 0, 0)).is_well_formed());
        assert!(!rule(at(15, 0, 0, 0), at(14, 0, 0, 0)).is_well_formed());
    }

    #[test]
    fn test_currency_code_parsing() {
        assert_eq!("EUR".parse::<CurrencyCode>().unwrap().as_str(), "EUR");
        assert!("eur".parse::<CurrencyCode>().is_err());
        assert!("EURO".parse::<CurrencyCode>().is_err());
        assert!(matches!(
            "".parse::<CurrencyCode>(),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_ids_serialize_as_bare_integers() {
        assert_eq!(serde_json::to_string(&BrandId::new(7)).unwrap(), "7");
        let id: ProductId = serde_json::from_str("35455").unwrap();
        assert_eq!(id, ProductId::new(35455));
    }

    #[test]
    fn test_rule_json_shape() {
        let r = rule(at(14, 15, 0, 0), at(14, 18, 30, 0));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["productId"], 35455);
        assert_eq!(json["priceListId"], 2);
        assert_eq!(json["amount"], 2545);
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["validFrom"], "2020-06-14T15:00:00");

        let back: PriceRule = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_rule_json_rejects_bad_currency() {
        let mut json = serde_json::to_value(rule(at(14, 0, 0, 0), at(15, 0, 0, 0))).unwrap();
        json["currency"] = serde_json::Value::from("euros");
        assert!(serde_json::from_value::<PriceRule>(json).is_err());
    }
}
