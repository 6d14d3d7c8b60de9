//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! orderdeck migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERDECK_DATABASE_URL` - `PostgreSQL` connection string

use super::{CommandError, connect};

/// Run the admin database migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
