//! Database migration command.
//!
//! Creates the session table and applies `crates/server/migrations/`.
//!
//! # Environment Variables
//!
//! - `STORE_DECISION_DATABASE_URL` / `DATABASE_URL` - `PostgreSQL` connection string

use secrecy::SecretString;
use store_decision_server::db::{self, MigrationError};
use thiserror::Error;
use tracing::info;

/// Errors running the migration command.
#[derive(Debug, Error)]
pub enum MigrateCommandError {
    #[error("Missing environment variable: STORE_DECISION_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Run all database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails.
pub async fn run() -> Result<(), MigrateCommandError> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("STORE_DECISION_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrateCommandError::MissingDatabaseUrl)?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    db::migrate(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
