// src/config.rs

use anyhow::{anyhow, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
}

/// Log filter used when `RUST_LOG` is unset. Read on its own so the subscriber
/// can be installed before the rest of the config is parsed.
pub fn log_level() -> String {
    log_level_from(|key| std::env::var(key).ok())
}

fn log_level_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LOG_LEVEL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "info".into())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set (environment or .env file)"))?;

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT);
        let db_max_connections = match parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            DEFAULT_DB_MAX_CONNECTIONS,
        ) {
            0 => {
                tracing::warn!(
                    default = DEFAULT_DB_MAX_CONNECTIONS,
                    "DB_MAX_CONNECTIONS=0 would leave the pool empty, using default"
                );
                DEFAULT_DB_MAX_CONNECTIONS
            }
            n => n,
        };

        Ok(Config { database_url, port, db_max_connections })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, %default, "unparseable value, using default");
            default
        }),
    }
}
