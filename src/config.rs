use std::{env, str::FromStr, time::Duration};

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  pub min_connections: u32,
  pub max_lifetime: Duration,
}

impl ServerConfig {
  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

impl Config {
  /// Loads the configuration from the process environment.
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let server = ServerConfig {
      host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
      port: parse_or(&lookup, "SERVER_PORT", 8080)?,
      request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
    };

    let url = match lookup("DATABASE_URL") {
      Some(url) => url,
      None => format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()),
        lookup("DB_PASSWORD").unwrap_or_else(|| "postgres".to_string()),
        lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
        parse_or::<u16, _>(&lookup, "DB_PORT", 5432)?,
        lookup("DB_NAME").unwrap_or_else(|| "age_calculator".to_string()),
        lookup("DB_SSLMODE").unwrap_or_else(|| "disable".to_string()),
      ),
    };

    let database = DatabaseConfig {
      url,
      max_connections: parse_or(&lookup, "DB_MAX_OPEN_CONNS", 25)?,
      min_connections: parse_or(&lookup, "DB_MIN_CONNS", 5)?,
      max_lifetime: Duration::from_secs(parse_or(&lookup, "DB_CONN_MAX_LIFETIME_SECS", 300)?),
    };

    if database.min_connections > database.max_connections {
      bail!(
        "DB_MIN_CONNS ({}) must not exceed DB_MAX_OPEN_CONNS ({})",
        database.min_connections,
        database.max_connections
      );
    }

    Ok(Self { server, database })
  }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
  F: Fn(&str) -> Option<String>,
{
  match lookup(key) {
    Some(raw) => raw
      .trim()
      .parse()
      .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
    None => Ok(default),
  }
}
