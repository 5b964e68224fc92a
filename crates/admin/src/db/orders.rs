//! Database operations for orders.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use shelf_core::{OrderId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{NewOrder, Order};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    price: i32,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            price: Price::from_minor(row.price),
            created_at: row.created_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order. `created_at` defaults to now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert(
        &self,
        order: &NewOrder,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, product_id, price, created_at)
            VALUES ($1, $2, $3, COALESCE($4, NOW()))
            RETURNING id, user_id, product_id, price, created_at
            ",
        )
        .bind(order.user_id.as_i32())
        .bind(order.product_id.as_i32())
        .bind(order.price.minor_units())
        .bind(created_at)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Order counts per UTC calendar day for `start <= created_at <= end`.
    ///
    /// Only days with at least one order are returned, ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_per_day(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, i64)>, RepositoryError> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            r"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS aggregate
            FROM orders
            WHERE created_at BETWEEN $1 AND $2
            GROUP BY day
            ORDER BY day
            ",
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
