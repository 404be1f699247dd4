//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde_json::Value;
use tracing::{debug, info};

use super::AppState;
use super::error::ApiError;
use super::types::{
    ApiInfo, CostComparisonResponse, OrderedMap, PricePlanRecord, RecommendationRecord,
    StoreReadingsResponse,
};
use super::validation::{
    ValidationError, parse_limit, validate_readings_request, validate_smart_meter_id,
};
use crate::pricing;
use crate::readings::ElectricityReading;

/// Service name, version and endpoint overview.
///
/// `GET /api` → 200 + `ApiInfo` JSON
pub async fn get_api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        name: "JOI Energy API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Smart meter electricity reading and price plan comparison API",
        endpoints: OrderedMap(vec![
            (
                "POST /readings/store",
                "Store electricity readings for a smart meter",
            ),
            (
                "GET /readings/read/:smartMeterId",
                "Retrieve readings for a smart meter",
            ),
            (
                "GET /price-plans/compare-all/:smartMeterId",
                "Compare costs across all price plans",
            ),
            (
                "GET /price-plans/recommend/:smartMeterId",
                "Get price plan recommendations (use ?limit=N)",
            ),
            ("GET /price-plans", "Get all available price plans"),
        ]),
    })
}

/// Meter id from the route, with extractor rejections reported as 400 JSON.
fn meter_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    let Path(smart_meter_id) = path.map_err(|e| ValidationError::new(e.body_text()))?;
    validate_smart_meter_id(&smart_meter_id)?;
    Ok(smart_meter_id)
}

/// Appends a batch of readings to a meter.
///
/// `POST /readings/store` → 200 + `StoreReadingsResponse` JSON
/// invalid payload → 400 + `ErrorResponse`
pub async fn store_readings(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<StoreReadingsResponse>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::new("Request body is required").into());
    }
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ValidationError::new(format!("Malformed JSON body: {e}")))?;
    let request = validate_readings_request(&payload)?;

    let count = request.electricity_readings.len();
    state
        .store
        .store(&request.smart_meter_id, request.electricity_readings)?;
    info!(smart_meter_id = %request.smart_meter_id, count, "readings stored");

    Ok(Json(StoreReadingsResponse {
        success: true,
        message: "Readings stored successfully",
    }))
}

/// Returns a meter's readings in insertion order.
///
/// `GET /readings/read/{smartMeterId}` → 200 + `Vec<ElectricityReading>` JSON
/// unknown meter → 404 + `ErrorResponse`
pub async fn read_readings(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<ElectricityReading>>, ApiError> {
    let smart_meter_id = meter_id(path)?;
    match state.store.get(&smart_meter_id)? {
        Some(readings) => Ok(Json(readings)),
        None => Err(ApiError::NotFound(format!(
            "No readings found for smart meter: {smart_meter_id}"
        ))),
    }
}

/// Costs of every plan for a meter's usage.
///
/// `GET /price-plans/compare-all/{smartMeterId}` → 200 + `CostComparisonResponse` JSON
/// meter without readings → 404 + `ErrorResponse`
pub async fn compare_all(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CostComparisonResponse>, ApiError> {
    let smart_meter_id = meter_id(path)?;
    let comparison = pricing::compare_all_plans(&state.store, &state.catalog, &smart_meter_id)?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No readings found for smart meter: {smart_meter_id}. \
                 Cannot compare price plans without usage data."
            ))
        })?;
    debug!(%smart_meter_id, current = %comparison.current_plan_id, "compared plans");
    Ok(Json(comparison.into()))
}

/// Plans ranked cheapest first, optionally limited.
///
/// `GET /price-plans/recommend/{smartMeterId}?limit=N` → 200 + `[{planId: cost}]` JSON
/// bad limit → 400, meter without readings → 404
///
/// A repeated `limit` takes its first value.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<RecommendationRecord>>, ApiError> {
    let smart_meter_id = meter_id(path)?;
    let Query(params) = query.map_err(|e| ValidationError::new(e.body_text()))?;
    let raw_limit = params
        .iter()
        .find(|(key, _)| key == "limit")
        .map(|(_, value)| value.as_str());
    let limit = parse_limit(raw_limit)?;

    let ranked = pricing::recommend(&state.store, &state.catalog, &smart_meter_id, limit)?;
    if ranked.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No readings found for smart meter: {smart_meter_id}. \
             Cannot make recommendations without usage data."
        )));
    }
    Ok(Json(ranked.into_iter().map(Into::into).collect()))
}

/// Every plan in catalog order.
///
/// `GET /price-plans` → 200 + `Vec<PricePlanRecord>` JSON
pub async fn get_price_plans(State(state): State<Arc<AppState>>) -> Json<Vec<PricePlanRecord>> {
    Json(
        state
            .catalog
            .plans()
            .iter()
            .map(PricePlanRecord::from)
            .collect(),
    )
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
