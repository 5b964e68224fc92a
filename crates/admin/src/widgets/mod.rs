//! Dashboard widgets.

mod orders_per_day;

use serde::Serialize;

pub use orders_per_day::{OrdersPerDay, TrendValue, per_day_series};

/// Chart.js chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
}

impl ChartType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
        }
    }
}

/// Width of a widget in the dashboard grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSpan {
    /// The full row.
    Full,
    /// Half a row.
    Half,
}

/// One labelled data series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<i64>,
}

/// Chart payload: x-axis labels plus datasets aligned with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Everything the dashboard needs to render a chart widget.
#[derive(Debug, Clone, Serialize)]
pub struct ChartWidget {
    pub heading: &'static str,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub column_span: ColumnSpan,
    pub max_height: &'static str,
    pub data: ChartData,
}

impl ChartWidget {
    /// Tailwind grid class for the column span.
    #[must_use]
    pub const fn span_class(&self) -> &'static str {
        match self.column_span {
            ColumnSpan::Full => "col-span-full",
            ColumnSpan::Half => "col-span-1",
        }
    }

    /// Chart config consumed by the dashboard script.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn chart_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&serde_json::json!({
            "type": self.chart_type,
            "data": self.data,
        }))
    }
}
