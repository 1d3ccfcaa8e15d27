// src/routes/breakdowns.rs

use axum::{extract::{Query, State}, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    db,
    filters::{build_predicate, Predicate, SalesFilter},
    models::{ChartData, LabelValue},
    AppState,
};
use super::{bad_request, internal_error};

#[derive(Deserialize)]
pub struct BreakdownQ {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub enum Measure {
    Revenue,
    Orders,
    Customers,
}

impl Measure {
    fn sql(self) -> &'static str {
        match self {
            Measure::Revenue => "COALESCE(SUM(revenue), 0)",
            Measure::Orders => "COUNT(DISTINCT order_id)",
            Measure::Customers => "COUNT(DISTINCT customer_id)",
        }
    }
}

/// `column` must be one of the fixed sales columns, never request input.
fn breakdown_sql(column: &str, measure: Measure, pred: &Predicate, limit: Option<i64>) -> String {
    let limit = limit
        .map(|n| format!(" LIMIT {}", n.clamp(1, 100)))
        .unwrap_or_default();
    format!(
        r#"SELECT COALESCE({column}, 'Unknown') AS label,
                  {}::float8 AS value
           FROM public.sales{}
           GROUP BY 1
           ORDER BY value DESC, label ASC{limit}"#,
        measure.sql(),
        pred.where_clause()
    )
}

async fn breakdown(
    state: &AppState,
    f: &SalesFilter,
    q: &BreakdownQ,
    column: &str,
    measure: Measure,
) -> Result<Json<ChartData>, (StatusCode, String)> {
    let pred = build_predicate(f).map_err(bad_request)?;
    let sql = breakdown_sql(column, measure, &pred, q.limit);
    let mut conn = state.pool.acquire().await.map_err(internal_error)?;
    let rows = db::fetch_all::<LabelValue>(&mut conn, &sql, &pred.params)
        .await
        .map_err(internal_error)?;
    Ok(Json(ChartData::from_rows(rows)))
}

// GET /api/revenue/by-region
pub async fn revenue_by_region(
    State(state): State<AppState>,
    Query(f): Query<SalesFilter>,
    Query(q): Query<BreakdownQ>,
) -> Result<Json<ChartData>, (StatusCode, String)> {
    breakdown(&state, &f, &q, "region", Measure::Revenue).await
}

// GET /api/revenue/by-product
pub async fn revenue_by_product(
    State(state): State<AppState>,
    Query(f): Query<SalesFilter>,
    Query(q): Query<BreakdownQ>,
) -> Result<Json<ChartData>, (StatusCode, String)> {
    breakdown(&state, &f, &q, "product", Measure::Revenue).await
}

// GET /api/revenue/by-category
pub async fn revenue_by_category(
    State(state): State<AppState>,
    Query(f): Query<SalesFilter>,
    Query(q): Query<BreakdownQ>,
) -> Result<Json<ChartData>, (StatusCode, String)> {
    breakdown(&state, &f, &q, "category", Measure::Revenue).await
}

// GET /api/orders/by-channel
pub async fn orders_by_channel(
    State(state): State<AppState>,
    Query(f): Query<SalesFilter>,
    Query(q): Query<BreakdownQ>,
) -> Result<Json<ChartData>, (StatusCode, String)> {
    breakdown(&state, &f, &q, "channel", Measure::Orders).await
}

// GET /api/customers/by-tier
pub async fn customers_by_tier(
    State(state): State<AppState>,
    Query(f): Query<SalesFilter>,
    Query(q): Query<BreakdownQ>,
) -> Result<Json<ChartData>, (StatusCode, String)> {
    breakdown(&state, &f, &q, "customer_tier", Measure::Customers).await
}
