// src/db/mod.rs

use std::time::Instant;

use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgConnection, PgPool, Postgres};

use crate::config::Config;
use crate::filters::FilterValue;

pub async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!(max_connections = config.db_max_connections, "connected to PostgreSQL");
    Ok(pool)
}

fn bind_all<'q, T>(
    mut query: QueryAs<'q, Postgres, T, PgArguments>,
    params: &[FilterValue],
) -> QueryAs<'q, Postgres, T, PgArguments> {
    for p in params {
        query = match p {
            FilterValue::Text(s) => query.bind(s.clone()),
            FilterValue::TextList(v) => query.bind(v.clone()),
            FilterValue::Date(d) => query.bind(*d),
        };
    }
    query
}

// Handlers check out one `PoolConnection` per request and pass it in here;
// it goes back to the pool when the handler drops it, on error paths too.

pub async fn fetch_all<T>(
    conn: &mut PgConnection,
    sql: &str,
    params: &[FilterValue],
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let started = Instant::now();
    let rows = bind_all(sqlx::query_as::<_, T>(sql), params).fetch_all(conn).await?;
    tracing::debug!(
        params = params.len(),
        rows = rows.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "report query"
    );
    Ok(rows)
}

pub async fn fetch_one<T>(
    conn: &mut PgConnection,
    sql: &str,
    params: &[FilterValue],
) -> Result<T, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let started = Instant::now();
    let row = bind_all(sqlx::query_as::<_, T>(sql), params).fetch_one(conn).await?;
    tracing::debug!(
        params = params.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "report query"
    );
    Ok(row)
}
