use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{filters::FilterError, AppState};

pub mod kpis;
pub mod trends;
pub mod breakdowns;
pub mod metadata;

// Common error mappers
pub fn internal_error<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    tracing::error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("internal error: {e}"))
}

pub fn bad_request(e: FilterError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

// GET /health, answered without touching the pool
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": env!("CARGO_PKG_NAME"), "version": "v1" }))
}

pub fn router(state: AppState) -> Router {
    // Dashboard is served from another origin in dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // KPI cards
        .route("/api/kpis", get(kpis::get_kpis))
        // charts
        .route("/api/revenue/trend", get(trends::revenue_trend))
        .route("/api/revenue/by-region", get(breakdowns::revenue_by_region))
        .route("/api/revenue/by-product", get(breakdowns::revenue_by_product))
        .route("/api/revenue/by-category", get(breakdowns::revenue_by_category))
        .route("/api/orders/by-channel", get(breakdowns::orders_by_channel))
        .route("/api/customers/by-tier", get(breakdowns::customers_by_tier))
        // dropdowns
        .route("/api/filters", get(metadata::filter_options))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
