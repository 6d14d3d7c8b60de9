//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use orderdeck_core::metrics::{OrderDetail, OrderUpdate, present_order};
use orderdeck_core::model::Order;
use orderdeck_core::types::{OrderId, OrderStatus};

use crate::{
    db::{ExpenseRepository, OrderRepository, PaymentLogRepository},
    error::AppError,
    middleware::RequireAdmin,
    state::AppState,
};

/// Order listing response.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    /// All orders, newest first.
    pub orders: Vec<Order>,
}

/// Order listing handler.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<OrdersResponse>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(OrdersResponse { orders }))
}

/// Fetch an order or produce a 404.
async fn fetch_order(state: &AppState, id: i32) -> Result<Order, AppError> {
    OrderRepository::new(state.pool())
        .get_by_id(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

/// Order detail handler.
///
/// Joins the order with its expense entries and payment log.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderDetail>, AppError> {
    let order = fetch_order(&state, id).await?;

    let expense_repo = ExpenseRepository::new(state.pool());
    let payment_repo = PaymentLogRepository::new(state.pool());
    let (expenses, payments) = tokio::join!(expense_repo.list_all(), payment_repo.list_all());

    Ok(Json(present_order(order, &expenses?, &payments?)))
}

/// Partial order update handler.
///
/// Validation runs against the stored order before any write; a rejected
/// update never reaches the database.
#[instrument(skip(_admin, state, update))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<OrderUpdate>,
) -> Result<Json<Order>, AppError> {
    let order = fetch_order(&state, id).await?;
    update.validate(&order)?;

    if update.is_empty() {
        return Ok(Json(order));
    }

    let updated = OrderRepository::new(state.pool())
        .update_fields(order.id, &update)
        .await?;
    tracing::info!(order_id = %updated.id, "Order updated");
    Ok(Json(updated))
}

/// Guard a status transition, producing a 409 for illegal ones.
fn check_transition(order: &Order, next: OrderStatus) -> Result<(), AppError> {
    if order.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "cannot move order {} from {} to {next}",
            order.id, order.status
        )))
    }
}

/// Mark-paid handler: `pending -> paid`.
///
/// Settles the outstanding amount and appends a payment log entry.
#[instrument(skip(_admin, state))]
pub async fn mark_paid(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Order>, AppError> {
    let order = fetch_order(&state, id).await?;
    check_transition(&order, OrderStatus::Paid)?;

    let updated = OrderRepository::new(state.pool())
        .mark_paid(order.id)
        .await?;
    tracing::info!(order_id = %updated.id, "Order marked as paid");
    Ok(Json(updated))
}

/// Cancel handler: `pending -> canceled`.
#[instrument(skip(_admin, state))]
pub async fn cancel(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Order>, AppError> {
    let order = fetch_order(&state, id).await?;
    check_transition(&order, OrderStatus::Canceled)?;

    let updated = OrderRepository::new(state.pool()).cancel(order.id).await?;
    tracing::info!(order_id = %updated.id, "Order canceled");
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(1),
            user_id: None,
            customer_name: "Sana Malik".to_string(),
            customer_email: None,
            customer_phone: None,
            customer_address: None,
            customer_city: None,
            customer_zip: None,
            line_items: vec![],
            total_amount: Decimal::new(5000, 2),
            paid_payment: Decimal::ZERO,
            pending_payment: Decimal::new(5000, 2),
            status,
            delivered_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_pending_order_can_be_paid_or_canceled() {
        let pending = order(OrderStatus::Pending);
        assert!(check_transition(&pending, OrderStatus::Paid).is_ok());
        assert!(check_transition(&pending, OrderStatus::Canceled).is_ok());
    }

    #[test]
    fn test_terminal_orders_reject_transitions() {
        let paid = order(OrderStatus::Paid);
        assert!(matches!(
            check_transition(&paid, OrderStatus::Canceled),
            Err(AppError::Conflict(_))
        ));

        let canceled = order(OrderStatus::Canceled);
        assert!(matches!(
            check_transition(&canceled, OrderStatus::Paid),
            Err(AppError::Conflict(_))
        ));
    }
}
