use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects eagerly so that an unreachable database fails startup.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.max_connections)
    .min_connections(config.min_connections)
    .max_lifetime(config.max_lifetime)
    .acquire_timeout(ACQUIRE_TIMEOUT)
    .connect(&config.url)
    .await
    .context("Failed to connect to database")?;

  tracing::info!(
    max_connections = config.max_connections,
    min_connections = config.min_connections,
    "Database connection established"
  );

  Ok(pool)
}
