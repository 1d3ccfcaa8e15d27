// src/routes/kpis.rs

use axum::{extract::{Query, State}, http::StatusCode, Json};

use crate::{
    db,
    filters::{build_predicate, SalesFilter},
    models::{Kpis, LabelValue, TotalsRow},
    AppState,
};
use super::{bad_request, internal_error, trends::monthly_revenue_sql};

// GET /api/kpis
pub async fn get_kpis(
    State(state): State<AppState>,
    Query(f): Query<SalesFilter>,
) -> Result<Json<Kpis>, (StatusCode, String)> {
    let pred = build_predicate(&f).map_err(bad_request)?;

    let totals_sql = format!(
        r#"SELECT COALESCE(SUM(revenue), 0)::float8   AS total_revenue,
                  COUNT(DISTINCT order_id)            AS total_orders,
                  COUNT(DISTINCT customer_id)         AS total_customers,
                  COALESCE(SUM(quantity), 0)::int8    AS total_units
           FROM public.sales{}"#,
        pred.where_clause()
    );
    let mut conn = state.pool.acquire().await.map_err(internal_error)?;
    let totals = db::fetch_one::<TotalsRow>(&mut conn, &totals_sql, &pred.params)
        .await
        .map_err(internal_error)?;

    // MoM growth comes off the same filtered monthly series the trend chart uses
    let months = db::fetch_all::<LabelValue>(&mut conn, &monthly_revenue_sql(&pred), &pred.params)
        .await
        .map_err(internal_error)?;
    let series: Vec<f64> = months.iter().map(|m| m.value).collect();

    Ok(Json(Kpis::from_totals(totals, &series)))
}
