//! Shared database types and utilities.
//!
//! Provides `DatabaseError`, `unix_timestamp()`, and the PostgreSQL pool
//! creation helper used by the server's storage layer.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{Pool, Postgres};
use tracing::info;

/// Database errors shared across Plugstore storage layers.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(e: sqlx::Error) -> Self {
        Self::Query(e.to_string())
    }
}

/// Open a PostgreSQL connection pool for the given connection string.
///
/// When `ssl_required` is set, the connection insists on TLS
/// (`sslmode=require`); otherwise the driver's default negotiation applies.
pub async fn connect_pool(url: &str, ssl_required: bool) -> Result<Pool<Postgres>, DatabaseError> {
    let mut options =
        PgConnectOptions::from_str(url).map_err(|e| DatabaseError::Connection(e.to_string()))?;
    if ssl_required {
        options = options.ssl_mode(PgSslMode::Require);
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::Connection(e.to_string()))?;

    info!("Database pool connected");

    Ok(pool)
}

/// Returns the current time as a Unix timestamp (seconds since epoch).
#[allow(clippy::cast_possible_wrap)]
pub fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
