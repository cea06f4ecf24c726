//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  GET /api/prices/v1?dateTime=..&productId=..&brandId=..                │
//! │       └──► PriceService::find_applicable_price_via_store (SQL match)   │
//! │                                                                         │
//! │  GET /api/prices/v2?dateTime=..&productId=..&brandId=..                │
//! │       └──► PriceService::find_applicable_price (in-process resolver)   │
//! │                                                                         │
//! │  GET /health                                                           │
//! │       └──► Database::health_check                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parameters are checked in the order dateTime, productId, brandId; the
//! first problem found is the one reported.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use pricing_core::{BrandId, PriceQuery, ProductId};
use tracing::{debug, info};

use crate::dto::{HealthResponse, PriceResponse};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Accepted `dateTime` layouts, tried in order.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Which resolution contract a route uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contract {
    /// The store selects the rule.
    ViaStore,
    /// The resolver selects among all candidates.
    InProcess,
}

/// Builds the application router.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/prices/v1", get(price_v1_handler))
        .route("/api/prices/v2", get(price_v2_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

async fn price_v1_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(&state, &uri, &params, Contract::ViaStore).await
}

async fn price_v2_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    respond(&state, &uri, &params, Contract::InProcess).await
}

/// Health check endpoint.
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable".to_string(),
            }),
        )
    }
}

async fn respond(
    state: &AppState,
    uri: &Uri,
    params: &HashMap<String, String>,
    mode: Contract,
) -> Response {
    match lookup(state, params, mode).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => e.into_response_at(uri.path()),
    }
}

async fn lookup(
    state: &AppState,
    params: &HashMap<String, String>,
    mode: Contract,
) -> ApiResult<PriceResponse> {
    let query = parse_query(params)?;

    debug!(
        product_id = %query.product_id,
        brand_id = %query.brand_id,
        instant = %query.instant,
        ?mode,
        "Price lookup"
    );

    let rule = match mode {
        Contract::ViaStore => state.service.find_applicable_price_via_store(&query).await?,
        Contract::InProcess => state.service.find_applicable_price(&query).await?,
    };

    info!(
        product_id = %rule.product_id,
        brand_id = %rule.brand_id,
        price_list = %rule.price_list_id,
        price = %rule.amount,
        "Price resolved"
    );

    Ok(rule.into())
}

// =============================================================================
// Parameter Parsing
// =============================================================================

fn parse_query(params: &HashMap<String, String>) -> ApiResult<PriceQuery> {
    let instant = parse_date_time(required(params, "dateTime")?)?;
    let product_id = ProductId::new(parse_id(params, "productId")?);
    let brand_id = BrandId::new(parse_id(params, "brandId")?);

    Ok(PriceQuery::new(instant, product_id, brand_id))
}

/// Returns a parameter's trimmed value; empty counts as missing.
fn required<'a>(params: &'a HashMap<String, String>, name: &'static str) -> ApiResult<&'a str> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingParameter(name))
}

fn parse_id(params: &HashMap<String, String>, name: &'static str) -> ApiResult<i64> {
    required(params, name)?
        .parse()
        .map_err(|_| ApiError::TypeMismatch {
            name,
            expected: "integer",
        })
}

/// Parses an ISO-8601 local date-time (`2020-06-14T10:00:00`).
fn parse_date_time(raw: &str) -> ApiResult<NaiveDateTime> {
    let mut last_error = None;

    for format in DATE_TIME_FORMATS {
        match NaiveDateTime::parse_from_str(raw, format) {
            Ok(instant) => return Ok(instant),
            Err(e) => last_error = Some(e),
        }
    }

    Err(ApiError::InvalidDate(match last_error {
        Some(e) => format!("'{}' could not be parsed: {}", raw, e),
        None => format!("'{}' could not be parsed", raw),
    }))
}
