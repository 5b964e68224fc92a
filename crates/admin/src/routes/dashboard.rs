//! Dashboard route handlers.

use askama::Template;
use axum::{Json, extract::State, response::Html};
use chrono::Utc;
use tracing::instrument;

use super::{Shell, render};
use crate::error::AppError;
use crate::state::AppState;
use crate::widgets::{ChartWidget, OrdersPerDay};

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub shell: Shell,
    pub widgets: Vec<WidgetView>,
}

/// A chart widget ready for the page script.
#[derive(Debug, Clone)]
pub struct WidgetView {
    pub id: &'static str,
    pub heading: &'static str,
    pub span_class: &'static str,
    pub max_height: &'static str,
    pub chart_json: String,
}

impl WidgetView {
    fn new(id: &'static str, widget: &ChartWidget) -> Result<Self, AppError> {
        Ok(Self {
            id,
            heading: widget.heading,
            span_class: widget.span_class(),
            max_height: widget.max_height,
            chart_json: widget
                .chart_json()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        })
    }
}

/// Dashboard page handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let orders = OrdersPerDay::load(state.pool(), Utc::now()).await?;

    let template = DashboardTemplate {
        shell: Shell::new("Dashboard", "/"),
        widgets: vec![WidgetView::new("orders-per-day", &orders)?],
    };
    Ok(render(&template))
}

/// Orders-per-day widget data.
#[instrument(skip(state))]
pub async fn orders_per_day(State(state): State<AppState>) -> Result<Json<ChartWidget>, AppError> {
    Ok(Json(OrdersPerDay::load(state.pool(), Utc::now()).await?))
}
