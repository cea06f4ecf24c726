//! Wire shapes of the price API.

use chrono::NaiveDateTime;
use pricing_core::PriceRule;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of a successful price lookup.
///
/// ```json
/// {
///   "productId": 35455, "brandId": 1, "priceList": 2,
///   "startDate": "2020-06-14T15:00:00", "endDate": "2020-06-14T18:30:00",
///   "price": "25.45", "currency": "EUR"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceResponse {
    pub product_id: i64,
    pub brand_id: i64,
    pub price_list: i64,
    #[ts(as = "String")]
    pub start_date: NaiveDateTime,
    #[ts(as = "String")]
    pub end_date: NaiveDateTime,
    /// Exact decimal string with two fraction digits.
    pub price: String,
    pub currency: String,
}

impl From<PriceRule> for PriceResponse {
    fn from(rule: PriceRule) -> Self {
        PriceResponse {
            product_id: rule.product_id.get(),
            brand_id: rule.brand_id.get(),
            price_list: rule.price_list_id.get(),
            start_date: rule.valid_from,
            end_date: rule.valid_to,
            price: rule.amount.to_string(),
            currency: rule.currency.as_str().to_string(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status reason phrase ("Not Found", "Bad Request", ...).
    pub error: String,
    pub message: String,
    /// Request path, without query string.
    pub path: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
}
