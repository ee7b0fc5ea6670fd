//! Database connection pool, startup retry, and migration utilities.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::AppConfig;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Connect to the configured database, retrying a fixed number of times.
///
/// Makes `1 + database_connect_retries` attempts, sleeping
/// `database_retry_delay_secs` between them. Returns the last error once the
/// attempts are exhausted.
pub async fn connect_with_retry(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let options = config.connect_options();
    let delay = Duration::from_secs(config.database_retry_delay_secs);
    let max_attempts = config.database_connect_retries + 1;
    let mut attempt = 1;

    loop {
        match create_pool(options.clone(), config.database_max_connections).await {
            Ok(pool) => {
                tracing::info!(
                    host = %config.database_hostname,
                    database = %config.database_name,
                    attempt,
                    "Database connection established"
                );
                return Ok(pool);
            }
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts,
                    retry_in_secs = delay.as_secs(),
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, attempt, "Database connection failed, giving up");
                return Err(e);
            }
        }
    }
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
