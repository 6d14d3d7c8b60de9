//! Order domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OrderId, OrderStatus, UserId};

/// A single purchased product line on an order.
///
/// Stored denormalized on the order (JSONB column) because the original
/// product row may be edited or deleted after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name at the time of purchase.
    pub product_name: String,
    /// Quantity purchased.
    pub quantity: i64,
    /// Unit price at the time of purchase.
    pub unit_price: Decimal,
}

impl LineItem {
    /// The extended price for this line (quantity x unit price).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// A customer purchase record with payment and delivery state.
///
/// Created at checkout (external to this system), mutated by payment
/// updates or field edits, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// The registered user who placed the order, if any.
    pub user_id: Option<UserId>,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact email.
    pub customer_email: Option<String>,
    /// Customer contact phone.
    pub customer_phone: Option<String>,
    /// Shipping address.
    pub customer_address: Option<String>,
    /// Shipping city.
    pub customer_city: Option<String>,
    /// Shipping postal code.
    pub customer_zip: Option<String>,
    /// Purchased product lines.
    pub line_items: Vec<LineItem>,
    /// Total order value.
    pub total_amount: Decimal,
    /// Amount received so far.
    pub paid_payment: Decimal,
    /// Amount still outstanding.
    pub pending_payment: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Date the order was delivered, if it has been.
    pub delivered_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Rounding tolerance for the paid + pending == total invariant.
    #[must_use]
    pub fn payment_tolerance() -> Decimal {
        Decimal::new(1, 2)
    }

    /// Whether paid + pending reconciles with the total within tolerance.
    #[must_use]
    pub fn payments_reconcile(&self) -> bool {
        let diff = self.paid_payment + self.pending_payment - self.total_amount;
        diff.abs() <= Self::payment_tolerance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(total: Decimal, paid: Decimal, pending: Decimal) -> Order {
        Order {
            id: OrderId::new(1),
            user_id: None,
            customer_name: "Asha Rahim".to_string(),
            customer_email: None,
            customer_phone: None,
            customer_address: None,
            customer_city: None,
            customer_zip: None,
            line_items: vec![],
            total_amount: total,
            paid_payment: paid,
            pending_payment: pending,
            status: OrderStatus::Pending,
            delivered_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_line_total() {
        let item = LineItem {
            product_name: "Widget".to_string(),
            quantity: 3,
            unit_price: Decimal::new(1250, 2),
        };
        assert_eq!(item.line_total(), Decimal::new(3750, 2));
    }

    #[test]
    fn test_payments_reconcile_within_tolerance() {
        assert!(order(Decimal::new(10000, 2), Decimal::new(6000, 2), Decimal::new(4000, 2))
            .payments_reconcile());
        // off by exactly one cent is still tolerated
        assert!(order(Decimal::new(10000, 2), Decimal::new(6000, 2), Decimal::new(4001, 2))
            .payments_reconcile());
        // off by two cents is not
        assert!(!order(Decimal::new(10000, 2), Decimal::new(6000, 2), Decimal::new(4002, 2))
            .payments_reconcile());
    }
}
