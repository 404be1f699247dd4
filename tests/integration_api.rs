//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use joi_energy::api::{AppState, router};

/// Build API state the way a fresh process does.
fn build_api_state() -> Arc<AppState> {
    Arc::new(AppState {
        store: common::seeded_store(),
        catalog: common::default_catalog(),
    })
}

async fn call(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router(Arc::clone(state)).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn store_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/readings/store")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn price_plans_endpoint_lists_catalog() {
    let state = build_api_state();
    let (status, json) = call(&state, get("/price-plans")).await;

    assert_eq!(status, StatusCode::OK);
    let plans = json.as_array().unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0]["planId"], "price-plan-0");
    assert_eq!(plans[0]["planName"], "Dr Evil's Dark Energy");
    assert_eq!(plans[0]["unitRate"], 10.0);
    assert!(plans[0].get("peakTimeMultiplier").is_none());
}

#[tokio::test]
async fn api_info_lists_endpoints() {
    let state = build_api_state();
    let (status, json) = call(&state, get("/api")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "JOI Energy API");
    assert_eq!(json["endpoints"].as_object().map(|o| o.len()), Some(5));
}

#[tokio::test]
async fn store_read_round_trip_for_fresh_meter() {
    let state = build_api_state();
    let payload = serde_json::json!({
        "smartMeterId": "fresh-meter",
        "electricityReadings": [
            {"time": 1000, "reading": 0.5},
            {"time": 2000, "reading": 0.6}
        ]
    });

    let (status, json) = call(&state, store_request(&payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Readings stored successfully");

    let (status, json) = call(&state, get("/readings/read/fresh-meter")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!([
            {"time": 1000, "reading": 0.5},
            {"time": 2000, "reading": 0.6}
        ])
    );
}

#[tokio::test]
async fn fresh_meter_comparison_uses_unknown_plan() {
    let state = build_api_state();
    let payload = serde_json::json!({
        "smartMeterId": "fresh-meter",
        "electricityReadings": [
            {"time": 0, "reading": 0.5},
            {"time": 3600, "reading": 0.5}
        ]
    });
    call(&state, store_request(&payload)).await;

    let (status, json) = call(&state, get("/price-plans/compare-all/fresh-meter")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pricePlanId"], "unknown");
    assert_eq!(json["pricePlanComparisons"]["price-plan-0"], 10.0);
    assert_eq!(json["pricePlanComparisons"]["price-plan-1"], 2.0);
    assert_eq!(json["pricePlanComparisons"]["price-plan-2"], 1.0);
}

#[tokio::test]
async fn seeded_meter_comparison_and_recommendation() {
    let state = build_api_state();

    let (status, json) = call(&state, get("/price-plans/compare-all/smart-meter-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pricePlanId"], "price-plan-1");
    assert_eq!(json["pricePlanComparisons"].as_object().map(|o| o.len()), Some(3));

    let (status, json) = call(&state, get("/price-plans/recommend/smart-meter-1")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].get("price-plan-2").is_some());
    assert!(entries[2].get("price-plan-0").is_some());
    for entry in entries {
        assert_eq!(entry.as_object().map(|o| o.len()), Some(1));
    }
}

#[tokio::test]
async fn recommend_with_limit() {
    let state = build_api_state();
    let (status, json) = call(&state, get("/price-plans/recommend/smart-meter-4?limit=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn status_mapping_for_bad_and_missing_input() {
    let state = build_api_state();

    let (status, _) = call(&state, get("/price-plans/recommend/smart-meter-0?limit=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = call(&state, get("/price-plans/compare-all/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("ghost"));

    let bad = serde_json::json!({
        "smartMeterId": "m",
        "electricityReadings": [{"time": 1, "reading": -1}]
    });
    let (status, json) = call(&state, store_request(&bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Reading at index 0: reading must be non-negative");

    let (status, _) = call(&state, get("/readings/read/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
