//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! # Dashboard
//! GET  /                                  - Dashboard with widgets
//! GET  /widgets/orders-per-day            - Orders-per-day chart data (JSON)
//!
//! # Products
//! GET  /products                          - Product table
//! GET  /products/create                   - Create form
//! POST /products                          - Store
//! POST /products/bulk-delete              - Soft-delete selected products
//! GET  /products/{id}                     - View page (infolist + tags)
//! GET  /products/{id}/edit                - Edit form
//! POST /products/{id}/edit                - Update
//! POST /products/{id}/delete              - Soft delete
//! POST /products/{id}/toggle-active       - Inline is_active toggle
//! POST /products/{id}/status              - Inline status select
//!
//! # Product tags
//! POST /products/{id}/tags                - Attach or create-and-attach
//! POST /products/{id}/tags/{tag}/detach   - Detach
//!
//! # Search
//! GET  /search?q=                         - Global search
//! ```

pub mod dashboard;
pub mod products;
pub mod search;
pub mod tags;

use askama::Template;
use axum::{
    Router,
    response::Html,
    routing::{get, post},
};

use crate::resources::{self, NavigationItem};
use crate::state::AppState;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/widgets/orders-per-day", get(dashboard::orders_per_day))
        .route("/products", get(products::index).post(products::store))
        .route("/products/create", get(products::create))
        .route("/products/bulk-delete", post(products::bulk_delete))
        .route("/products/{id}", get(products::show))
        .route("/products/{id}/edit", get(products::edit).post(products::update))
        .route("/products/{id}/delete", post(products::delete))
        .route("/products/{id}/toggle-active", post(products::toggle_active))
        .route("/products/{id}/status", post(products::set_status))
        .route("/products/{id}/tags", post(tags::attach))
        .route("/products/{id}/tags/{tag}/detach", post(tags::detach))
        .route("/search", get(search::index))
}

/// Sidebar link for templates.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub icon: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Page chrome shared by every template.
#[derive(Debug, Clone)]
pub struct Shell {
    pub title: String,
    pub navigation: Vec<NavLink>,
}

impl Shell {
    #[must_use]
    pub fn new(title: impl Into<String>, current_path: &str) -> Self {
        Self {
            title: title.into(),
            navigation: resources::navigation()
                .iter()
                .map(|item: &NavigationItem| NavLink {
                    label: item.label,
                    icon: item.icon,
                    href: item.href,
                    active: item.is_active(current_path),
                })
                .collect(),
        }
    }
}

/// Render a template, logging failures.
pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_marks_active_link() {
        let shell = Shell::new("Products", "/products/3");
        let active: Vec<&str> = shell
            .navigation
            .iter()
            .filter(|l| l.active)
            .map(|l| l.label)
            .collect();
        assert_eq!(active, vec!["Products"]);
    }
}
