//! Window totals and period-over-period trend computation.

use rust_decimal::Decimal;
use serde::Serialize;

/// Count and monetary sum for one time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WindowTotals {
    /// Number of records in the window.
    pub count: u64,
    /// Sum of the records' monetary amounts.
    pub sum: Decimal,
}

/// Totals for the current and previous windows plus percentage changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendMetric {
    /// Totals for the current window.
    pub current: WindowTotals,
    /// Totals for the equal-length preceding window.
    pub previous: WindowTotals,
    /// Percentage change in record count.
    pub count_change: Decimal,
    /// Percentage change in monetary sum.
    pub sum_change: Decimal,
}

/// Compute count and sum for a window.
///
/// `amount` extracts the monetary contribution of a record; pass a closure
/// returning `Decimal::ZERO` for collections that only contribute counts
/// (users, products).
pub fn window_totals<T>(records: &[&T], amount: impl Fn(&T) -> Decimal) -> WindowTotals {
    WindowTotals {
        count: records.len() as u64,
        sum: records.iter().map(|record| amount(record)).sum(),
    }
}

/// Percentage change from `previous` to `current`.
///
/// `((current - previous) / previous) * 100`, with one deliberate edge
/// rule: when `previous` is zero the change is `100` if `current` is
/// positive and `0` otherwise. Displayed percentages depend on this
/// convention; do not "fix" it to return infinity or an error.
#[must_use]
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    } else {
        (current - previous) / previous * Decimal::ONE_HUNDRED
    }
}

/// Compare a current window against its preceding window.
pub fn trend<T>(
    current: &[&T],
    previous: &[&T],
    amount: impl Fn(&T) -> Decimal,
) -> TrendMetric {
    let current = window_totals(current, &amount);
    let previous = window_totals(previous, &amount);
    TrendMetric {
        count_change: percent_change(Decimal::from(current.count), Decimal::from(previous.count)),
        sum_change: percent_change(current.sum, previous.sum),
        current,
        previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_zero_previous_positive_current_is_one_hundred() {
        assert_eq!(percent_change(dec(500), Decimal::ZERO), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_zero_previous_zero_current_is_zero() {
        assert_eq!(percent_change(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_ordinary_percent_change() {
        assert_eq!(
            percent_change(Decimal::from(150), Decimal::from(100)),
            Decimal::from(50)
        );
        assert_eq!(
            percent_change(Decimal::from(50), Decimal::from(100)),
            Decimal::from(-50)
        );
    }

    #[test]
    fn test_window_totals_counts_and_sums() {
        let amounts = vec![dec(10000), dec(5000)];
        let refs: Vec<&Decimal> = amounts.iter().collect();
        let totals = window_totals(&refs, |d| *d);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.sum, dec(15000));
    }

    #[test]
    fn test_empty_previous_window_trend() {
        // previous window count=0, current window count=3 -> change=100%
        let amounts = vec![dec(100), dec(200), dec(300)];
        let current: Vec<&Decimal> = amounts.iter().collect();
        let previous: Vec<&Decimal> = vec![];
        let metric = trend(&current, &previous, |d| *d);
        assert_eq!(metric.current.count, 3);
        assert_eq!(metric.previous.count, 0);
        assert_eq!(metric.count_change, Decimal::ONE_HUNDRED);
        assert_eq!(metric.sum_change, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_trend_against_nonempty_previous() {
        let current_amounts = vec![dec(20000)];
        let previous_amounts = vec![dec(10000)];
        let current: Vec<&Decimal> = current_amounts.iter().collect();
        let previous: Vec<&Decimal> = previous_amounts.iter().collect();
        let metric = trend(&current, &previous, |d| *d);
        assert_eq!(metric.sum_change, Decimal::ONE_HUNDRED);
        assert_eq!(metric.count_change, Decimal::ZERO);
    }
}
