//! Database operations for the admin `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Admin users (argon2 password hashes)
//! - `categories` / `shops` - Product catalog dimensions
//! - `products` - Product catalog
//! - `orders` - Customer orders (line items embedded as JSONB)
//! - `expenses` - Per-order expense ledger (items embedded as JSONB)
//! - `order_payment_logs` - Append-only payment audit trail
//! - `session` - Session storage (tower-sessions)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p orderdeck-cli -- migrate
//! ```
//!
//! Repositories use the runtime `query_as` API with internal `*Row` types;
//! enum-ish columns are TEXT and parsed during row conversion, reporting
//! unexpected values as [`RepositoryError::DataCorruption`].

pub mod catalog;
pub mod expenses;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::{CategoryRepository, ShopRepository};
pub use expenses::{ExpenseRepository, PaymentLogRepository};
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique-constraint violations into
    /// [`RepositoryError::Conflict`].
    pub(crate) fn from_sqlx(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Conflict(conflict_message.to_string());
            }
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
