// src/main.rs

use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod filters;
mod models;
mod routes;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    // Subscriber first so config fallbacks get logged
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::log_level())),
        )
        .init();

    let config = config::Config::from_env()?;

    let pool = db::connect(&config).await?;
    let app = routes::router(AppState { pool });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "sales analytics API listening");

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
