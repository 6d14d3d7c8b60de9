//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("{0}")]
    Invalid(String),
}

/// Connect to the admin database using `ORDERDECK_DATABASE_URL`.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ORDERDECK_DATABASE_URL")
        .map_err(|_| CommandError::MissingEnvVar("ORDERDECK_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = orderdeck_admin::db::create_pool(&SecretString::from(database_url)).await?;
    Ok(pool)
}
