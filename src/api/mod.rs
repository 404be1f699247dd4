//! REST API over the reading store and pricing engine.
//!
//! Endpoints:
//! - `POST /readings/store`: append readings for a meter
//! - `GET /readings/read/{smartMeterId}`: stored readings
//! - `GET /price-plans`: plan catalog
//! - `GET /price-plans/compare-all/{smartMeterId}`: cost under every plan
//! - `GET /price-plans/recommend/{smartMeterId}?limit=N`: cheapest plans first
//! - `GET /api`: service info

pub mod error;
mod handlers;
pub mod types;
pub mod validation;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::pricing::PlanCatalog;
use crate::readings::ReadingStore;

/// Application state shared across all request handlers.
///
/// Constructed once at startup and wrapped in `Arc`. The catalog is
/// read-only; the store synchronizes its own appends.
pub struct AppState {
    /// Readings for every meter.
    pub store: ReadingStore,
    /// Price plans and meter accounts.
    pub catalog: PlanCatalog,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::get_api_info))
        .route("/api", get(handlers::get_api_info))
        .route("/readings/store", post(handlers::store_readings))
        .route(
            "/readings/read/{smart_meter_id}",
            get(handlers::read_readings),
        )
        .route("/price-plans", get(handlers::get_price_plans))
        .route(
            "/price-plans/compare-all/{smart_meter_id}",
            get(handlers::compare_all),
        )
        .route(
            "/price-plans/recommend/{smart_meter_id}",
            get(handlers::recommend),
        )
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
