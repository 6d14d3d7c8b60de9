//! Order repository.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use orderdeck_core::metrics::OrderUpdate;
use orderdeck_core::model::{LineItem, Order};
use orderdeck_core::types::{OrderId, OrderStatus, UserId};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: Option<i32>,
    customer_name: String,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    customer_address: Option<String>,
    customer_city: Option<String>,
    customer_zip: Option<String>,
    line_items: Json<Vec<LineItem>>,
    total_amount: Decimal,
    paid_payment: Decimal,
    pending_payment: Decimal,
    status: String,
    delivered_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|e: String| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: row.user_id.map(UserId::new),
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            customer_address: row.customer_address,
            customer_city: row.customer_city,
            customer_zip: row.customer_zip,
            line_items: row.line_items.0,
            total_amount: row.total_amount,
            paid_payment: row.paid_payment,
            pending_payment: row.pending_payment,
            status,
            delivered_date: row.delivered_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, user_id, customer_name, customer_email, customer_phone, \
     customer_address, customer_city, customer_zip, line_items, total_amount, \
     paid_payment, pending_payment, status, delivered_date, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Apply a validated partial update, returning the updated order.
    ///
    /// Absent fields fall through to the stored values via COALESCE, so the
    /// statement is one static query regardless of which fields are set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_fields(
        &self,
        id: OrderId,
        update: &OrderUpdate,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET \
                 customer_email = COALESCE($2, customer_email), \
                 customer_phone = COALESCE($3, customer_phone), \
                 customer_address = COALESCE($4, customer_address), \
                 customer_city = COALESCE($5, customer_city), \
                 customer_zip = COALESCE($6, customer_zip), \
                 created_at = COALESCE($7, created_at), \
                 delivered_date = COALESCE($8, delivered_date), \
                 total_amount = COALESCE($9, total_amount), \
                 paid_payment = COALESCE($10, paid_payment), \
                 pending_payment = COALESCE($11, pending_payment), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(update.email.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.address.as_deref())
        .bind(update.city.as_deref())
        .bind(update.zip.as_deref())
        .bind(update.created_at)
        .bind(update.delivered_date)
        .bind(update.total_amount)
        .bind(update.paid_payment)
        .bind(update.pending_payment)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), TryInto::try_into)
    }

    /// Transition a pending order to paid.
    ///
    /// Settles the outstanding amount and appends a payment log entry for
    /// it, in one transaction. The row is locked and re-checked inside the
    /// transaction so a concurrent transition loses cleanly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist, or
    /// `RepositoryError::Conflict` if it is no longer pending.
    pub async fn mark_paid(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let pending: Option<(String, Decimal)> = sqlx::query_as(
            "SELECT status, pending_payment FROM orders WHERE id = $1 FOR UPDATE",
        )
        .bind(id.as_i32())
        .fetch_optional(&mut *tx)
        .await?;

        let Some((status, outstanding)) = pending else {
            return Err(RepositoryError::NotFound);
        };
        if status != OrderStatus::Pending.to_string() {
            return Err(RepositoryError::Conflict(format!(
                "order is {status}, not pending"
            )));
        }

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET \
                 status = 'paid', \
                 paid_payment = total_amount, \
                 pending_payment = 0, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        if outstanding > Decimal::ZERO {
            sqlx::query(
                "INSERT INTO order_payment_logs (order_id, amount, paid_at) \
                 VALUES ($1, $2, now())",
            )
            .bind(id.as_i32())
            .bind(outstanding)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        row.try_into()
    }

    /// Transition a pending order to canceled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist, or
    /// `RepositoryError::Conflict` if it is no longer pending.
    pub async fn cancel(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = 'canceled', updated_at = now() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => {
                // Distinguish a missing order from an illegal transition.
                if self.get_by_id(id).await?.is_some() {
                    Err(RepositoryError::Conflict(
                        "order is not pending".to_string(),
                    ))
                } else {
                    Err(RepositoryError::NotFound)
                }
            }
        }
    }
}
