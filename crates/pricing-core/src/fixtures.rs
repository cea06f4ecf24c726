//! Test fixtures: the reference price table for product 35455 of brand 1.

use chrono::{NaiveDate, NaiveDateTime};

use crate::money::Money;
use crate::types::{BrandId, PriceListId, PriceRule, ProductId};

pub const PRODUCT: ProductId = ProductId::new(35455);
pub const BRAND: BrandId = BrandId::new(1);

pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}

pub fn rule(
    price_list: i64,
    valid_from: NaiveDateTime,
    valid_to: NaiveDateTime,
    priority: i32,
    cents: i64,
) -> PriceRule {
    PriceRule {
        brand_id: BRAND,
        product_id: PRODUCT,
        price_list_id: PriceListId::new(price_list),
        valid_from,
        valid_to,
        priority,
        amount: Money::from_cents(cents),
        currency: "EUR".parse().unwrap(),
    }
}

pub fn fixture_rules() -> Vec<PriceRule> {
    vec![
        rule(1, at(2020, 6, 14, 0, 0, 0), at(2020, 12, 31, 23, 59, 59), 0, 3550),
        rule(2, at(2020, 6, 14, 15, 0, 0), at(2020, 6, 14, 18, 30, 0), 1, 2545),
        rule(3, at(2020, 6, 15, 0, 0, 0), at(2020, 6, 15, 11, 0, 0), 1, 3050),
        rule(4, at(2020, 6, 15, 16, 0, 0), at(2020, 12, 31, 23, 59, 59), 1, 3895),
    ]
}
