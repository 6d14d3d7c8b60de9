//! Expense ledger and payment log types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ExpenseId, OrderId, PaymentLogId};

/// One cost item inside an expense entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    /// Expense kind (e.g. "shipping", "packaging").
    pub kind: String,
    /// Cost amount.
    pub amount: Decimal,
}

/// Per-order operational cost entry, distinct from customer payments.
///
/// Created externally; read-only from the aggregation core's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Expense entry ID.
    pub id: ExpenseId,
    /// The order this expense belongs to.
    pub order_id: OrderId,
    /// Cost items (JSONB column).
    pub items: Vec<ExpenseItem>,
    /// Date the expense was incurred.
    pub expense_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ExpenseEntry {
    /// Sum of all item amounts in this entry.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }
}

/// Append-only record of a payment received against an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLogEntry {
    /// Payment log entry ID.
    pub id: PaymentLogId,
    /// The order this payment was made against.
    pub order_id: OrderId,
    /// Amount received.
    pub amount: Decimal,
    /// When the payment was received.
    pub paid_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expense_total_sums_items() {
        let entry = ExpenseEntry {
            id: ExpenseId::new(1),
            order_id: OrderId::new(7),
            items: vec![
                ExpenseItem {
                    kind: "shipping".to_string(),
                    amount: Decimal::new(550, 2),
                },
                ExpenseItem {
                    kind: "packaging".to_string(),
                    amount: Decimal::new(125, 2),
                },
            ],
            expense_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
        };
        assert_eq!(entry.total(), Decimal::new(675, 2));
    }
}
