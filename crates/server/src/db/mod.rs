//! `PostgreSQL` persistence.
//!
//! ## Tables
//!
//! - `tower_sessions.session` - Customer sessions (created by the session store)
//! - `order_store_metadata` - Routing metadata per order
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p store-decision-cli -- migrate
//! ```

mod orders;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tower_sessions_sqlx_store::PostgresStore;

pub use orders::PgOrderMetadataStore;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors running migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Session store migration failed: {0}")]
    Sessions(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrateError),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create the session table and apply the service migrations.
///
/// # Errors
///
/// Returns `MigrationError` if either step fails.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrationError> {
    PostgresStore::new(pool.clone()).migrate().await?;
    MIGRATOR.run(pool).await?;
    Ok(())
}
