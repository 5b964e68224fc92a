//! Database operations for the catalog `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `products` - Catalog products (soft-deleted via `deleted_at`)
//! - `categories` - Product categories
//! - `tags` / `product_tag` - Product tags and the many-to-many pivot
//! - `orders` - Orders, read for the dashboard widget
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p shelf-cli -- migrate
//! ```

pub mod categories;
pub mod orders;
pub mod products;
pub mod tags;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use categories::CategoryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use tags::TagRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique product name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique violation to `RepositoryError::Conflict`.
pub(crate) fn conflict_on_unique(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

/// Page sizes offered by the table.
pub const PER_PAGE_OPTIONS: [u32; 4] = [5, 10, 25, 50];

/// Default page size.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Build from query parameters, clamping to valid values.
    ///
    /// `page` is at least 1; `per_page` must be one of [`PER_PAGE_OPTIONS`].
    #[must_use]
    pub fn from_params(page: Option<u32>, per_page: Option<u32>) -> Self {
        let per_page = per_page
            .filter(|n| PER_PAGE_OPTIONS.contains(n))
            .unwrap_or(DEFAULT_PER_PAGE);
        Self {
            page: page.unwrap_or(1).max(1),
            per_page,
        }
    }

    #[must_use]
    pub fn limit(self) -> i64 {
        i64::from(self.per_page)
    }

    #[must_use]
    pub fn offset(self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }
}

/// One page of results plus the total row count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Number of pages (at least 1).
    #[must_use]
    pub fn last_page(&self) -> u32 {
        let per_page = i64::from(self.pagination.per_page.max(1));
        let pages = (self.total + per_page - 1) / per_page;
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.pagination.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.pagination.page < self.last_page()
    }
}

/// Escape `LIKE` wildcards and wrap in `%` for a substring match.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps() {
        assert_eq!(Pagination::from_params(None, None), Pagination::default());
        assert_eq!(
            Pagination::from_params(Some(0), Some(7)),
            Pagination {
                page: 1,
                per_page: DEFAULT_PER_PAGE
            }
        );
        assert_eq!(
            Pagination::from_params(Some(3), Some(25)),
            Pagination {
                page: 3,
                per_page: 25
            }
        );
    }

    #[test]
    fn test_pagination_offset() {
        let p = Pagination {
            page: 3,
            per_page: 10,
        };
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 20);
        assert_eq!(Pagination::default().offset(), 0);
    }

    #[test]
    fn test_page_bounds() {
        let page: Page<()> = Page {
            items: vec![],
            total: 21,
            pagination: Pagination {
                page: 2,
                per_page: 10,
            },
        };
        assert_eq!(page.last_page(), 3);
        assert!(page.has_previous());
        assert!(page.has_next());

        let empty: Page<()> = Page {
            items: vec![],
            total: 0,
            pagination: Pagination::default(),
        };
        assert_eq!(empty.last_page(), 1);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("mug"), "%mug%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
