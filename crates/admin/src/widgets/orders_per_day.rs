//! Daily order count over the last 60 days.

use chrono::{DateTime, Days, NaiveDate, Utc};
use sqlx::PgPool;

use super::{ChartData, ChartType, ChartWidget, ColumnSpan, Dataset};
use crate::db::{OrderRepository, RepositoryError};

/// A single day's aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendValue {
    pub date: NaiveDate,
    pub aggregate: i64,
}

/// Bar chart of orders per day.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrdersPerDay;

impl OrdersPerDay {
    pub const HEADING: &'static str = "Orders per day";
    pub const DATASET_LABEL: &'static str = "Orders per day";
    pub const CHART_TYPE: ChartType = ChartType::Bar;
    pub const COLUMN_SPAN: ColumnSpan = ColumnSpan::Full;
    pub const MAX_HEIGHT: &'static str = "400px";
    pub const WINDOW_DAYS: u64 = 60;

    /// Inclusive `[now - 60 days, now]` window.
    #[must_use]
    pub fn window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = now
            .checked_sub_days(Days::new(Self::WINDOW_DAYS))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        (start, now)
    }

    /// Shape a per-day series into chart data.
    #[must_use]
    pub fn chart_data(series: &[TrendValue]) -> ChartData {
        ChartData {
            labels: series.iter().map(|v| v.date.format("%Y-%m-%d").to_string()).collect(),
            datasets: vec![Dataset {
                label: Self::DATASET_LABEL.to_owned(),
                data: series.iter().map(|v| v.aggregate).collect(),
            }],
        }
    }

    /// Wrap chart data with the widget's presentation settings.
    #[must_use]
    pub fn widget(data: ChartData) -> ChartWidget {
        ChartWidget {
            heading: Self::HEADING,
            chart_type: Self::CHART_TYPE,
            column_span: Self::COLUMN_SPAN,
            max_height: Self::MAX_HEIGHT,
            data,
        }
    }

    /// Query order counts and build the widget as of `now`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the count query fails.
    pub async fn load(pool: &PgPool, now: DateTime<Utc>) -> Result<ChartWidget, RepositoryError> {
        let (start, end) = Self::window(now);
        let counts = OrderRepository::new(pool).count_per_day(start, end).await?;
        let series = per_day_series(start.date_naive(), end.date_naive(), &counts);
        tracing::debug!(days = series.len(), "Orders per day computed");
        Ok(Self::widget(Self::chart_data(&series)))
    }
}

/// One entry per calendar day from `start` to `end` inclusive.
///
/// Days without a count are zero. Counts outside the range are ignored.
#[must_use]
pub fn per_day_series(start: NaiveDate, end: NaiveDate, counts: &[(NaiveDate, i64)]) -> Vec<TrendValue> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| TrendValue {
            date,
            aggregate: counts
                .iter()
                .find(|(day, _)| *day == date)
                .map_or(0, |(_, count)| *count),
        })
        .collect()
}
