//! Derived-metrics aggregation for the admin dashboard.
//!
//! Everything in this module is a pure, synchronous function over
//! collections the caller has already fetched: time-range filtering,
//! period-over-period trend computation, time-bucketed series building for
//! charts, and the order detail presenter. No state is retained between
//! calls and no I/O happens here.

pub mod presenter;
pub mod range;
pub mod series;
pub mod summary;

pub use presenter::{OrderDetail, OrderUpdate, ValidationError, present_order};
pub use range::{DateRange, Timestamped, filter_range};
pub use series::{Granularity, SeriesPoint, build_series};
pub use summary::{TrendMetric, WindowTotals, percent_change, trend, window_totals};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Order;
    use crate::types::{OrderId, OrderStatus};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn order(id: i32, day: u32, total: i64, paid: i64) -> Order {
        Order {
            id: OrderId::new(id),
            user_id: None,
            customer_name: format!("Customer {id}"),
            customer_email: None,
            customer_phone: None,
            customer_address: None,
            customer_city: None,
            customer_zip: None,
            line_items: vec![],
            total_amount: Decimal::from(total),
            paid_payment: Decimal::from(paid),
            pending_payment: Decimal::from(total - paid),
            status: OrderStatus::Pending,
            delivered_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 30, 0).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // The January window scenario, end to end: filter, totals, trend, series.
    #[test]
    fn test_january_window_scenario() {
        let orders = vec![order(1, 1, 100, 100), order(2, 8, 50, 0)];
        let range = DateRange::bounded(date(2024, 1, 1), date(2024, 1, 31));

        let current = filter_range(&orders, &range);
        let totals = window_totals(&current, |o| o.total_amount);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.sum, Decimal::from(150));

        // December was empty, so both changes hit the previous==0 rule
        let previous = range.preceding().expect("bounded window");
        let metric = trend(&current, &filter_range(&orders, &previous), |o| {
            o.total_amount
        });
        assert_eq!(metric.count_change, Decimal::ONE_HUNDRED);
        assert_eq!(metric.sum_change, Decimal::ONE_HUNDRED);

        // 31-day window charts daily; every order lands in exactly one bucket
        let granularity = Granularity::for_span_days(range.span_days().expect("bounded"));
        assert_eq!(granularity, Granularity::Day);
        let series = build_series(&current, &[], &[], granularity, date(2024, 1, 31));
        assert_eq!(series.len(), 31);
        assert_eq!(series.iter().map(|p| p.orders).sum::<u64>(), 2);
        assert_eq!(
            series.iter().map(|p| p.revenue).sum::<Decimal>(),
            Decimal::from(150)
        );
    }
}
