// src/routes/metadata.rs

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    db,
    filters::CATEGORY_COLUMNS,
    models::{DateRange, DateRangeRow, FilterOptions},
    AppState,
};
use super::internal_error;

const DATE_RANGE_SQL: &str =
    r#"SELECT MIN(order_date) AS min_date, MAX(order_date) AS max_date FROM public.sales"#;

/// Dropdown values for one column; request filters never apply here.
fn distinct_sql(column: &str) -> String {
    format!(
        r#"SELECT DISTINCT {column} AS value
           FROM public.sales
           WHERE {column} IS NOT NULL
           ORDER BY 1 ASC"#
    )
}

// GET /api/filters
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, (StatusCode, String)> {
    let mut conn = state.pool.acquire().await.map_err(internal_error)?;

    let mut lists = Vec::with_capacity(CATEGORY_COLUMNS.len());
    for col in &CATEGORY_COLUMNS {
        let rows = db::fetch_all::<(String,)>(&mut conn, &distinct_sql(col.column), &[])
            .await
            .map_err(internal_error)?;
        lists.push(rows.into_iter().map(|(v,)| v).collect::<Vec<_>>());
    }
    let [regions, products, categories, channels, tiers]: [Vec<String>; 5] = lists
        .try_into()
        .map_err(|_| internal_error("filter column count mismatch"))?;

    let range = db::fetch_one::<DateRangeRow>(&mut conn, DATE_RANGE_SQL, &[])
        .await
        .map_err(internal_error)?;

    Ok(Json(FilterOptions {
        regions,
        products,
        categories,
        channels,
        tiers,
        date_range: DateRange { min: range.min_date, max: range.max_date },
    }))
}
