use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::MySqlStore;

pub type DbPool = sqlx::MySqlPool;

/// Create a bounded connection pool from a database URL.
///
/// Requests beyond `max_connections` wait up to `acquire_timeout` for a
/// free connection before failing.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
