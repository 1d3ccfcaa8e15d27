// src/routes/trends.rs

use axum::{extract::{Query, State}, http::StatusCode, Json};

use crate::{
    db,
    filters::{build_predicate, Predicate, SalesFilter},
    models::{ChartData, LabelValue},
    AppState,
};
use super::{bad_request, internal_error};

/// Revenue per calendar month, oldest first, labelled `YYYY-MM`.
pub(super) fn monthly_revenue_sql(pred: &Predicate) -> String {
    format!(
        r#"SELECT to_char(date_trunc('month', order_date), 'YYYY-MM') AS label,
                  COALESCE(SUM(revenue), 0)::float8 AS value
           FROM public.sales{}
           GROUP BY 1
           ORDER BY 1"#,
        pred.where_clause()
    )
}

// GET /api/revenue/trend
pub async fn revenue_trend(
    State(state): State<AppState>,
    Query(f): Query<SalesFilter>,
) -> Result<Json<ChartData>, (StatusCode, String)> {
    let pred = build_predicate(&f).map_err(bad_request)?;
    let mut conn = state.pool.acquire().await.map_err(internal_error)?;
    let rows = db::fetch_all::<LabelValue>(&mut conn, &monthly_revenue_sql(&pred), &pred.params)
        .await
        .map_err(internal_error)?;
    Ok(Json(ChartData::from_rows(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_sql_without_filters_has_no_where() {
        let sql = monthly_revenue_sql(&Predicate::default());
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("FROM public.sales\n"));
    }

    #[test]
    fn monthly_sql_embeds_predicate() {
        let f = SalesFilter { region: Some("West".into()), ..Default::default() };
        let sql = monthly_revenue_sql(&build_predicate(&f).unwrap());
        assert!(sql.contains("FROM public.sales WHERE region = $1"));
        assert!(sql.trim_end().ends_with("ORDER BY 1"));
    }
}
