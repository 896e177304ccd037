use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::core::config::DatabaseConfig;

/// Builds the shared Postgres pool from the env-driven tuning knobs.
///
/// Every service and the token-lookup middleware clone this one pool; audit
/// writes ride on the mutating service's transaction, so a request never
/// holds more connections than the transaction it opened.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        "Opening database pool: max_connections={}, min_connections={}, acquire_timeout={}s",
        config.max_connections,
        config.min_connections,
        config.acquire_timeout_secs
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}
