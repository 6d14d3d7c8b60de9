//! Expense ledger and payment log repositories.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use orderdeck_core::model::{ExpenseEntry, ExpenseItem, PaymentLogEntry};
use orderdeck_core::types::{ExpenseId, OrderId, PaymentLogId};

use super::RepositoryError;

/// Internal row type for expense queries.
#[derive(Debug, sqlx::FromRow)]
struct ExpenseRow {
    id: i32,
    order_id: i32,
    items: Json<Vec<ExpenseItem>>,
    expense_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<ExpenseRow> for ExpenseEntry {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: ExpenseId::new(row.id),
            order_id: OrderId::new(row.order_id),
            items: row.items.0,
            expense_date: row.expense_date,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for payment log queries.
#[derive(Debug, sqlx::FromRow)]
struct PaymentLogRow {
    id: i32,
    order_id: i32,
    amount: Decimal,
    paid_at: DateTime<Utc>,
}

impl From<PaymentLogRow> for PaymentLogEntry {
    fn from(row: PaymentLogRow) -> Self {
        Self {
            id: PaymentLogId::new(row.id),
            order_id: OrderId::new(row.order_id),
            amount: row.amount,
            paid_at: row.paid_at,
        }
    }
}

/// Repository for the per-order expense ledger (read-only).
pub struct ExpenseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ExpenseRepository<'a> {
    /// Create a new expense repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full expense ledger, oldest entries first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ExpenseEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            "SELECT id, order_id, items, expense_date, created_at \
             FROM expenses ORDER BY expense_date, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Repository for the append-only order payment log.
pub struct PaymentLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentLogRepository<'a> {
    /// Create a new payment log repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full payment log, oldest entries first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<PaymentLogEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentLogRow>(
            "SELECT id, order_id, amount, paid_at \
             FROM order_payment_logs ORDER BY paid_at, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
