//! Dashboard metrics route handler.
//!
//! Serves the windowed totals, period-over-period trends, and the
//! time-bucketed chart series. All math lives in `orderdeck-core`; this
//! handler only fetches snapshots and serializes the result.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orderdeck_core::metrics::{
    DateRange, Granularity, SeriesPoint, TrendMetric, build_series, filter_range, trend,
};

use crate::{
    db::{OrderRepository, ProductRepository, UserRepository},
    error::AppError,
    middleware::RequireAdmin,
    state::AppState,
};

/// Default window when no bounds are supplied.
const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Query parameters for the metrics endpoint.
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    /// Window start date (YYYY-MM-DD).
    pub start: Option<NaiveDate>,
    /// Window end date (YYYY-MM-DD).
    pub end: Option<NaiveDate>,
}

impl MetricsQuery {
    /// Resolve the query into a bounded window.
    ///
    /// Missing bounds default to a 30-day window ending today (or ending on
    /// the supplied end date).
    fn to_range(&self, today: NaiveDate) -> DateRange {
        match (self.start, self.end) {
            (Some(start), Some(end)) => DateRange::bounded(start, end),
            (Some(start), None) => DateRange::bounded(start, today),
            (None, Some(end)) => DateRange::last_days(DEFAULT_WINDOW_DAYS, end),
            (None, None) => DateRange::last_days(DEFAULT_WINDOW_DAYS, today),
        }
    }
}

/// Dashboard metrics response.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// The resolved current window.
    pub range: DateRange,
    /// Bucketing granularity chosen for the series.
    pub granularity: Granularity,
    /// Order count and revenue, with period-over-period changes.
    pub orders: TrendMetric,
    /// Products added, with period-over-period change.
    pub products: TrendMetric,
    /// Users registered, with period-over-period change.
    pub users: TrendMetric,
    /// Chart series over the current window.
    pub series: Vec<SeriesPoint>,
}

/// Dashboard metrics handler.
///
/// Fetch failures surface as error responses; metrics are never computed
/// over partial data and an empty store is reported as such, not as a
/// silent row of zeros from a failed load.
#[instrument(skip(_admin, state))]
pub async fn metrics(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<MetricsResponse>, AppError> {
    let today = Utc::now().date_naive();
    let range = query.to_range(today);
    let previous = range
        .preceding()
        .ok_or_else(|| AppError::BadRequest("start date is after end date".to_string()))?;

    let order_repo = OrderRepository::new(state.pool());
    let product_repo = ProductRepository::new(state.pool());
    let user_repo = UserRepository::new(state.pool());

    let (orders, products, users) = tokio::join!(
        order_repo.list_all(),
        product_repo.list_all(),
        user_repo.list_all()
    );
    let (orders, products, users) = (orders?, products?, users?);

    let current_orders = filter_range(&orders, &range);
    let current_products = filter_range(&products, &range);
    let current_users = filter_range(&users, &range);

    let order_trend = trend(
        &current_orders,
        &filter_range(&orders, &previous),
        |order| order.total_amount,
    );
    let product_trend = trend(
        &current_products,
        &filter_range(&products, &previous),
        |_| Decimal::ZERO,
    );
    let user_trend = trend(&current_users, &filter_range(&users, &previous), |_| {
        Decimal::ZERO
    });

    // preceding() succeeded, so the range is bounded and has a span
    let span = range.span_days().unwrap_or(i64::from(DEFAULT_WINDOW_DAYS));
    let granularity = Granularity::for_span_days(span);
    let end = range.end.unwrap_or(today);
    let series = build_series(
        &current_orders,
        &current_products,
        &current_users,
        granularity,
        end,
    );

    Ok(Json(MetricsResponse {
        range,
        granularity,
        orders: order_trend,
        products: product_trend,
        users: user_trend,
        series,
    }))
}
