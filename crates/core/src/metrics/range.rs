//! Date-range filtering over timestamped records.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Order, Product, User};

/// A record that carries a timestamp the range filter can key on.
///
/// Returning `None` marks the timestamp as missing or unparseable; such
/// records are excluded from bounded ranges rather than treated as errors.
pub trait Timestamped {
    /// The timestamp used for range filtering and bucketing.
    fn recorded_at(&self) -> Option<DateTime<Utc>>;
}

impl Timestamped for Order {
    fn recorded_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Timestamped for Product {
    fn recorded_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Timestamped for User {
    fn recorded_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

/// An inclusive date window with optional bounds.
///
/// Either bound may be absent, meaning unbounded on that side. Comparison
/// is by calendar date: a record stamped anywhere within the end date's day
/// is inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First day in the window, if bounded below.
    pub start: Option<NaiveDate>,
    /// Last day in the window, if bounded above.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with no bounds; filtering with it is the identity.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Create a range from optional bounds.
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Create a fully bounded range.
    #[must_use]
    pub const fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// The window covering the last `days` days ending on `today` inclusive.
    #[must_use]
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(today);
        Self::bounded(start, today)
    }

    /// Whether both bounds are absent.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `at` falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let date = at.date_naive();
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Number of days the window spans, if fully bounded and non-inverted.
    #[must_use]
    pub fn span_days(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => {
                Some((end - start).num_days() + 1)
            }
            _ => None,
        }
    }

    /// The equal-length window immediately preceding this one.
    ///
    /// For an n-day window `[start, end]` this is `[start - n, start - 1]`.
    /// Returns `None` when the window is not fully bounded.
    #[must_use]
    pub fn preceding(&self) -> Option<Self> {
        let span = self.span_days()?;
        let start = self.start?;
        let prev_end = start.checked_sub_days(Days::new(1))?;
        let prev_start = start.checked_sub_days(Days::new(span.unsigned_abs()))?;
        Some(Self::bounded(prev_start, prev_end))
    }
}

/// Narrow `records` to those whose timestamp falls inside `range`.
///
/// With an unbounded range the full collection is returned unchanged (same
/// elements, same order). With any bound present, records without a valid
/// timestamp are excluded.
pub fn filter_range<'a, T: Timestamped>(records: &'a [T], range: &DateRange) -> Vec<&'a T> {
    if range.is_unbounded() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| {
            record
                .recorded_at()
                .is_some_and(|at| range.contains(at))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Event {
        at: Option<DateTime<Utc>>,
        label: &'static str,
    }

    impl Timestamped for Event {
        fn recorded_at(&self) -> Option<DateTime<Utc>> {
            self.at
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unbounded_filter_is_identity() {
        let events = vec![
            Event {
                at: Some(at(2024, 3, 1)),
                label: "a",
            },
            Event {
                at: None,
                label: "b",
            },
            Event {
                at: Some(at(2020, 1, 1)),
                label: "c",
            },
        ];
        let kept = filter_range(&events, &DateRange::unbounded());
        let labels: Vec<_> = kept.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let events = vec![
            Event {
                at: Some(at(2024, 1, 1)),
                label: "start",
            },
            Event {
                at: Some(at(2024, 1, 31)),
                label: "end",
            },
            Event {
                at: Some(at(2024, 2, 1)),
                label: "after",
            },
            Event {
                at: Some(at(2023, 12, 31)),
                label: "before",
            },
        ];
        let range = DateRange::bounded(date(2024, 1, 1), date(2024, 1, 31));
        let labels: Vec<_> = filter_range(&events, &range)
            .iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, vec!["start", "end"]);
    }

    #[test]
    fn test_missing_timestamp_excluded_from_bounded_range() {
        let events = vec![
            Event {
                at: None,
                label: "invalid",
            },
            Event {
                at: Some(at(2024, 1, 15)),
                label: "valid",
            },
        ];
        let range = DateRange::new(Some(date(2024, 1, 1)), None);
        let labels: Vec<_> = filter_range(&events, &range)
            .iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, vec!["valid"]);
    }

    #[test]
    fn test_half_open_ranges() {
        let events = vec![
            Event {
                at: Some(at(2024, 1, 1)),
                label: "early",
            },
            Event {
                at: Some(at(2024, 6, 1)),
                label: "late",
            },
        ];
        let from = DateRange::new(Some(date(2024, 3, 1)), None);
        let until = DateRange::new(None, Some(date(2024, 3, 1)));
        assert_eq!(filter_range(&events, &from).len(), 1);
        assert_eq!(filter_range(&events, &until).len(), 1);
    }

    #[test]
    fn test_span_days() {
        assert_eq!(
            DateRange::bounded(date(2024, 1, 1), date(2024, 1, 31)).span_days(),
            Some(31)
        );
        assert_eq!(
            DateRange::bounded(date(2024, 1, 1), date(2024, 1, 1)).span_days(),
            Some(1)
        );
        // inverted and unbounded windows have no span
        assert_eq!(
            DateRange::bounded(date(2024, 2, 1), date(2024, 1, 1)).span_days(),
            None
        );
        assert_eq!(DateRange::unbounded().span_days(), None);
    }

    #[test]
    fn test_preceding_window_is_equal_length() {
        let range = DateRange::bounded(date(2024, 1, 8), date(2024, 1, 14));
        let prev = range.preceding().expect("bounded range has a predecessor");
        assert_eq!(prev, DateRange::bounded(date(2024, 1, 1), date(2024, 1, 7)));
        assert_eq!(prev.span_days(), range.span_days());

        assert!(DateRange::unbounded().preceding().is_none());
    }

    #[test]
    fn test_last_days() {
        let range = DateRange::last_days(30, date(2024, 3, 31));
        assert_eq!(range, DateRange::bounded(date(2024, 3, 2), date(2024, 3, 31)));
        assert_eq!(range.span_days(), Some(30));
    }
}
