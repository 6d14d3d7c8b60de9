//! Order detail presentation and partial-update validation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{ExpenseEntry, Order, PaymentLogEntry};
use crate::types::{Email, EmailError};

/// An order joined with its expense entries and payment log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    /// The order itself.
    pub order: Order,
    /// Expense entries recorded against the order.
    pub expenses: Vec<ExpenseEntry>,
    /// Payments received against the order, oldest first.
    pub payments: Vec<PaymentLogEntry>,
}

/// Join an order with its expense and payment entries.
///
/// A plain O(n) scan over both ledgers; admin-dashboard data volumes do
/// not justify an index.
#[must_use]
pub fn present_order(
    order: Order,
    expenses: &[ExpenseEntry],
    payments: &[PaymentLogEntry],
) -> OrderDetail {
    let matching_expenses = expenses
        .iter()
        .filter(|entry| entry.order_id == order.id)
        .cloned()
        .collect();
    let matching_payments = payments
        .iter()
        .filter(|entry| entry.order_id == order.id)
        .cloned()
        .collect();
    OrderDetail {
        order,
        expenses: matching_expenses,
        payments: matching_payments,
    }
}

/// A field-level rejection of an order update.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A monetary field was negative.
    #[error("{field} must not be negative")]
    NegativeAmount {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The customer email did not parse.
    #[error("invalid customer email: {0}")]
    InvalidEmail(#[from] EmailError),
    /// paid + pending does not reconcile with total.
    #[error("paid ({paid}) + pending ({pending}) does not match total ({total})")]
    PaymentMismatch {
        /// Effective total amount.
        total: Decimal,
        /// Effective paid amount.
        paid: Decimal,
        /// Effective pending amount.
        pending: Decimal,
    },
}

impl ValidationError {
    /// The field the error is attached to, for field-level API responses.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NegativeAmount { field } => field,
            Self::InvalidEmail(_) => "email",
            Self::PaymentMismatch { .. } => "pending_payment",
        }
    }
}

/// Partial field set accepted by the order edit operation.
///
/// Absent fields are left untouched. Validation runs before any
/// persistence call so a rejected update never reaches the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    /// New customer email.
    pub email: Option<String>,
    /// New customer phone.
    pub phone: Option<String>,
    /// New shipping address.
    pub address: Option<String>,
    /// New shipping city.
    pub city: Option<String>,
    /// New postal code.
    pub zip: Option<String>,
    /// Corrected order creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Delivery date.
    pub delivered_date: Option<NaiveDate>,
    /// New total amount.
    pub total_amount: Option<Decimal>,
    /// New paid amount.
    pub paid_payment: Option<Decimal>,
    /// New pending amount.
    pub pending_payment: Option<Decimal>,
}

impl OrderUpdate {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.zip.is_none()
            && self.created_at.is_none()
            && self.delivered_date.is_none()
            && self.total_amount.is_none()
            && self.paid_payment.is_none()
            && self.pending_payment.is_none()
    }

    /// Whether any monetary field is part of the update.
    #[must_use]
    pub const fn touches_payments(&self) -> bool {
        self.total_amount.is_some()
            || self.paid_payment.is_some()
            || self.pending_payment.is_some()
    }

    /// Validate the update against the order it would apply to.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a monetary field is negative,
    /// the email does not parse, or the effective paid/pending/total
    /// combination no longer reconciles within the rounding tolerance.
    pub fn validate(&self, existing: &Order) -> Result<(), ValidationError> {
        for (field, value) in [
            ("total_amount", self.total_amount),
            ("paid_payment", self.paid_payment),
            ("pending_payment", self.pending_payment),
        ] {
            if let Some(amount) = value {
                if amount < Decimal::ZERO {
                    return Err(ValidationError::NegativeAmount { field });
                }
            }
        }

        if let Some(email) = &self.email {
            Email::parse(email)?;
        }

        if self.touches_payments() {
            let total = self.total_amount.unwrap_or(existing.total_amount);
            let paid = self.paid_payment.unwrap_or(existing.paid_payment);
            let pending = self.pending_payment.unwrap_or(existing.pending_payment);
            let diff = paid + pending - total;
            if diff.abs() > Order::payment_tolerance() {
                return Err(ValidationError::PaymentMismatch {
                    total,
                    paid,
                    pending,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpenseItem;
    use crate::types::{ExpenseId, OrderId, OrderStatus, PaymentLogId};
    use chrono::TimeZone;

    fn order(id: i32) -> Order {
        Order {
            id: OrderId::new(id),
            user_id: None,
            customer_name: "Farid Noor".to_string(),
            customer_email: Some("farid@example.com".to_string()),
            customer_phone: None,
            customer_address: None,
            customer_city: None,
            customer_zip: None,
            line_items: vec![],
            total_amount: Decimal::new(10000, 2),
            paid_payment: Decimal::new(4000, 2),
            pending_payment: Decimal::new(6000, 2),
            status: OrderStatus::Pending,
            delivered_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    fn expense(id: i32, order_id: i32) -> ExpenseEntry {
        ExpenseEntry {
            id: ExpenseId::new(id),
            order_id: OrderId::new(order_id),
            items: vec![ExpenseItem {
                kind: "shipping".to_string(),
                amount: Decimal::new(500, 2),
            }],
            expense_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap(),
        }
    }

    fn payment(id: i32, order_id: i32) -> PaymentLogEntry {
        PaymentLogEntry {
            id: PaymentLogId::new(id),
            order_id: OrderId::new(order_id),
            amount: Decimal::new(4000, 2),
            paid_at: Utc.with_ymd_and_hms(2024, 1, 3, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_join_picks_only_matching_entries() {
        // two expense entries for order 7, one for order 8
        let expenses = vec![expense(1, 7), expense(2, 7), expense(3, 8)];
        let payments = vec![payment(1, 7), payment(2, 9)];

        let detail = present_order(order(7), &expenses, &payments);
        assert_eq!(detail.expenses.len(), 2);
        assert!(detail.expenses.iter().all(|e| e.order_id == OrderId::new(7)));
        assert_eq!(detail.payments.len(), 1);
        assert_eq!(detail.payments[0].order_id, OrderId::new(7));
    }

    #[test]
    fn test_join_with_no_matches_is_empty() {
        let detail = present_order(order(1), &[expense(1, 2)], &[payment(1, 2)]);
        assert!(detail.expenses.is_empty());
        assert!(detail.payments.is_empty());
    }

    #[test]
    fn test_negative_pending_payment_rejected() {
        let update = OrderUpdate {
            pending_payment: Some(Decimal::new(-500, 2)),
            ..OrderUpdate::default()
        };
        assert_eq!(
            update.validate(&order(1)),
            Err(ValidationError::NegativeAmount {
                field: "pending_payment"
            })
        );
    }

    #[test]
    fn test_invalid_email_rejected() {
        let update = OrderUpdate {
            email: Some("not-an-email".to_string()),
            ..OrderUpdate::default()
        };
        let err = update.validate(&order(1)).expect_err("must reject");
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn test_payment_mismatch_rejected_against_existing_fields() {
        // raising paid without touching pending/total breaks the invariant
        let update = OrderUpdate {
            paid_payment: Some(Decimal::new(9000, 2)),
            ..OrderUpdate::default()
        };
        assert!(matches!(
            update.validate(&order(1)),
            Err(ValidationError::PaymentMismatch { .. })
        ));
    }

    #[test]
    fn test_consistent_payment_update_accepted() {
        let update = OrderUpdate {
            paid_payment: Some(Decimal::new(10000, 2)),
            pending_payment: Some(Decimal::ZERO),
            ..OrderUpdate::default()
        };
        assert!(update.validate(&order(1)).is_ok());
    }

    #[test]
    fn test_non_monetary_update_skips_payment_check() {
        let update = OrderUpdate {
            city: Some("Lahore".to_string()),
            ..OrderUpdate::default()
        };
        assert!(update.validate(&order(1)).is_ok());
        assert!(!update.is_empty());
        assert!(OrderUpdate::default().is_empty());
    }
}
