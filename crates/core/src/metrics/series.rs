//! Time-bucketed series building for dashboard charts.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::range::Timestamped;
use crate::model::{Order, Product, User};

/// Bucketing granularity for chart series.
///
/// Selected from the overall window length so charts stay readable: short
/// windows get daily points, long windows get quarterly ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
}

impl Granularity {
    /// Pick a granularity for a window spanning `days` days.
    #[must_use]
    pub const fn for_span_days(days: i64) -> Self {
        if days <= 31 {
            Self::Day
        } else if days <= 120 {
            Self::Week
        } else if days <= 730 {
            Self::Month
        } else {
            Self::Quarter
        }
    }

    /// Format the bucket key for `date`.
    ///
    /// All formats are zero-padded so lexicographic order over keys matches
    /// chronological order:
    /// - day     -> `YYYY-MM-DD`
    /// - week    -> `YYYY-MM-<week-of-month>` (week-of-month = (day-1)/7 + 1)
    /// - month   -> `YYYY-MM`
    /// - quarter -> `YYYY-Q<n>`
    #[must_use]
    pub fn bucket_key(self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Week => format!(
                "{:04}-{:02}-{}",
                date.year(),
                date.month(),
                (date.day() - 1) / 7 + 1
            ),
            Self::Month => date.format("%Y-%m").to_string(),
            Self::Quarter => format!("{:04}-Q{}", date.year(), (date.month() - 1) / 3 + 1),
        }
    }

    /// First day of the bucket containing `date`.
    fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => {
                let day = (date.day() - 1) / 7 * 7 + 1;
                date.with_day(day).unwrap_or(date)
            }
            Self::Month => date.with_day(1).unwrap_or(date),
            Self::Quarter => {
                let month = (date.month() - 1) / 3 * 3 + 1;
                date.with_day(1)
                    .and_then(|d| d.with_month(month))
                    .unwrap_or(date)
            }
        }
    }

    /// First day of the bucket after the one starting at `start`.
    fn next_bucket(self, start: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => start + Days::new(1),
            Self::Week => {
                // week buckets start on days 1, 8, 15, 22, 29
                if start.day() >= 29 {
                    first_of_next_month(start)
                } else {
                    start
                        .with_day(start.day() + 7)
                        .unwrap_or_else(|| first_of_next_month(start))
                }
            }
            Self::Month => first_of_next_month(start),
            Self::Quarter => (start + Months::new(3)).with_day(1).unwrap_or(start),
        }
    }
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    (date + Months::new(1)).with_day(1).unwrap_or(date)
}

/// One point in a chart series: running sums for a single time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    /// Bucket key (see [`Granularity::bucket_key`]).
    pub period: String,
    /// Orders created in the bucket.
    pub orders: u64,
    /// Revenue (sum of order totals) in the bucket.
    pub revenue: Decimal,
    /// Products added in the bucket.
    pub products: u64,
    /// Users registered in the bucket.
    pub users: u64,
}

#[derive(Debug, Default)]
struct Bucket {
    orders: u64,
    revenue: Decimal,
    products: u64,
    users: u64,
}

/// Build a chart series spanning the earliest relevant date through `end`.
///
/// Every bucket in the span is initialized to zero sums, then each record
/// is counted into its bucket exactly once. The output is ordered by
/// bucket key, which is chronological for every granularity. Pure function
/// of its inputs; records without a valid timestamp are skipped.
#[must_use]
pub fn build_series(
    orders: &[&Order],
    products: &[&Product],
    users: &[&User],
    granularity: Granularity,
    end: NaiveDate,
) -> Vec<SeriesPoint> {
    let earliest = orders
        .iter()
        .filter_map(|o| o.recorded_at())
        .chain(products.iter().filter_map(|p| p.recorded_at()))
        .chain(users.iter().filter_map(|u| u.recorded_at()))
        .map(|at| at.date_naive())
        .min();

    let Some(earliest) = earliest else {
        return Vec::new();
    };

    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();

    // Zero-fill every bucket in the span so gaps chart as zeros.
    let mut cursor = granularity.bucket_start(earliest);
    while cursor <= end {
        buckets.entry(granularity.bucket_key(cursor)).or_default();
        cursor = granularity.next_bucket(cursor);
    }

    for order in orders {
        if let Some(at) = order.recorded_at() {
            let bucket = buckets
                .entry(granularity.bucket_key(at.date_naive()))
                .or_default();
            bucket.orders += 1;
            bucket.revenue += order.total_amount;
        }
    }
    for product in products {
        if let Some(at) = product.recorded_at() {
            buckets
                .entry(granularity.bucket_key(at.date_naive()))
                .or_default()
                .products += 1;
        }
    }
    for user in users {
        if let Some(at) = user.recorded_at() {
            buckets
                .entry(granularity.bucket_key(at.date_naive()))
                .or_default()
                .users += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(period, bucket)| SeriesPoint {
            period,
            orders: bucket.orders,
            revenue: bucket.revenue,
            products: bucket.products,
            users: bucket.users,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderId, OrderStatus};
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: i32, y: i32, m: u32, d: u32, total_cents: i64) -> Order {
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
            total_amount: Decimal::new(total_cents, 2),
            paid_payment: Decimal::ZERO,
            pending_payment: Decimal::new(total_cents, 2),
            status: OrderStatus::Pending,
            delivered_date: None,
            created_at: Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_granularity_selection_by_span() {
        assert_eq!(Granularity::for_span_days(7), Granularity::Day);
        assert_eq!(Granularity::for_span_days(31), Granularity::Day);
        assert_eq!(Granularity::for_span_days(32), Granularity::Week);
        assert_eq!(Granularity::for_span_days(120), Granularity::Week);
        assert_eq!(Granularity::for_span_days(121), Granularity::Month);
        assert_eq!(Granularity::for_span_days(730), Granularity::Month);
        assert_eq!(Granularity::for_span_days(731), Granularity::Quarter);
    }

    #[test]
    fn test_bucket_keys() {
        let d = date(2024, 3, 9);
        assert_eq!(Granularity::Day.bucket_key(d), "2024-03-09");
        assert_eq!(Granularity::Week.bucket_key(d), "2024-03-2");
        assert_eq!(Granularity::Month.bucket_key(d), "2024-03");
        assert_eq!(Granularity::Quarter.bucket_key(d), "2024-Q1");

        // week-of-month boundaries
        assert_eq!(Granularity::Week.bucket_key(date(2024, 3, 1)), "2024-03-1");
        assert_eq!(Granularity::Week.bucket_key(date(2024, 3, 7)), "2024-03-1");
        assert_eq!(Granularity::Week.bucket_key(date(2024, 3, 8)), "2024-03-2");
        assert_eq!(Granularity::Week.bucket_key(date(2024, 3, 29)), "2024-03-5");
        assert_eq!(Granularity::Week.bucket_key(date(2024, 3, 31)), "2024-03-5");

        // quarter boundaries
        assert_eq!(Granularity::Quarter.bucket_key(date(2024, 4, 1)), "2024-Q2");
        assert_eq!(Granularity::Quarter.bucket_key(date(2024, 12, 31)), "2024-Q4");
    }

    #[test]
    fn test_series_spans_from_earliest_with_zero_gaps() {
        let orders = vec![order(1, 2024, 1, 1, 10000), order(2, 2024, 1, 4, 5000)];
        let refs: Vec<&Order> = orders.iter().collect();
        let series = build_series(&refs, &[], &[], Granularity::Day, date(2024, 1, 5));

        let periods: Vec<_> = series.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(
            periods,
            vec![
                "2024-01-01",
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-05"
            ]
        );
        assert_eq!(series[0].orders, 1);
        assert_eq!(series[0].revenue, Decimal::new(10000, 2));
        assert_eq!(series[1].orders, 0);
        assert_eq!(series[1].revenue, Decimal::ZERO);
        assert_eq!(series[3].orders, 1);
    }

    #[test]
    fn test_series_order_independent_and_lossless() {
        let mut orders = vec![
            order(1, 2024, 2, 10, 1000),
            order(2, 2024, 1, 5, 2000),
            order(3, 2024, 3, 1, 3000),
            order(4, 2024, 1, 5, 4000),
        ];
        let refs: Vec<&Order> = orders.iter().collect();
        let series_a = build_series(&refs, &[], &[], Granularity::Month, date(2024, 3, 31));

        orders.reverse();
        let refs: Vec<&Order> = orders.iter().collect();
        let series_b = build_series(&refs, &[], &[], Granularity::Month, date(2024, 3, 31));

        assert_eq!(series_a, series_b);

        // buckets are chronological
        let periods: Vec<_> = series_a.iter().map(|p| p.period.clone()).collect();
        let mut sorted = periods.clone();
        sorted.sort();
        assert_eq!(periods, sorted);

        // no record dropped or double-counted
        let total: u64 = series_a.iter().map(|p| p.orders).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_week_buckets_roll_over_short_months() {
        // Feb 2023 has 28 days: week starts are 1, 8, 15, 22; the 29th
        // candidate does not exist and the cursor moves to March 1.
        let orders = vec![order(1, 2023, 2, 3, 1000)];
        let refs: Vec<&Order> = orders.iter().collect();
        let series = build_series(&refs, &[], &[], Granularity::Week, date(2023, 3, 3));
        let periods: Vec<_> = series.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(
            periods,
            vec!["2023-02-1", "2023-02-2", "2023-02-3", "2023-02-4", "2023-03-1"]
        );
    }

    #[test]
    fn test_quarter_series_crosses_year_boundary() {
        let orders = vec![order(1, 2023, 11, 15, 1000), order(2, 2024, 2, 1, 2000)];
        let refs: Vec<&Order> = orders.iter().collect();
        let series = build_series(&refs, &[], &[], Granularity::Quarter, date(2024, 2, 1));
        let periods: Vec<_> = series.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2023-Q4", "2024-Q1"]);
    }

    #[test]
    fn test_mixed_record_kinds_count_into_their_own_sums() {
        use crate::types::{CategoryId, Email, OwnedImported, ProductId, UserId, UserRole};

        let orders = vec![order(1, 2024, 1, 2, 10000)];
        let product = Product {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            category_id: CategoryId::new(1),
            owned_imported: OwnedImported::Owned,
            company_name: Some("Acme".to_string()),
            shop_name: None,
            price: Decimal::new(999, 2),
            stock_quantity: 5,
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
        };
        let user = User {
            id: UserId::new(1),
            name: "Admin".to_string(),
            email: Email::parse("admin@example.com").unwrap(),
            role: UserRole::Admin,
            created_at: Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap(),
        };

        let order_refs: Vec<&Order> = orders.iter().collect();
        let series = build_series(
            &order_refs,
            &[&product],
            &[&user],
            Granularity::Day,
            date(2024, 1, 3),
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].orders, 1);
        assert_eq!(series[0].products, 1);
        assert_eq!(series[0].users, 0);
        assert_eq!(series[1].users, 1);
        assert_eq!(series[1].orders, 0);
    }

    #[test]
    fn test_empty_inputs_produce_empty_series() {
        let series = build_series(&[], &[], &[], Granularity::Day, date(2024, 1, 1));
        assert!(series.is_empty());
    }
}
