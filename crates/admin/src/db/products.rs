//! Database operations for products.
//!
//! Every read excludes soft-deleted rows (`deleted_at IS NOT NULL`).

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use shelf_core::{CategoryId, Price, ProductId, ProductStatus, TagId};

use super::{Page, Pagination, RepositoryError, conflict_on_unique, contains_pattern};
use crate::models::{
    NewProduct, Product, ProductFilter, ProductInput, ProductListItem, ProductPrice, ProductSort,
    SearchHit,
};

const NAME_TAKEN: &str = "product name already exists";

const PRODUCT_COLUMNS: &str = r"
    id, name, price, description, status, is_active, category_id, created_at, updated_at
";

const LIST_SELECT: &str = r"
    SELECT
        p.id, p.name, p.price, p.status, p.is_active,
        c.name AS category_name,
        ARRAY(
            SELECT t.name
            FROM product_tag pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.product_id = p.id
            ORDER BY t.name
        ) AS tag_names,
        p.created_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: i32,
    description: String,
    status: Option<ProductStatus>,
    is_active: bool,
    category_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: Price::from_minor(row.price),
            description: row.description,
            status: row.status,
            is_active: row.is_active,
            category_id: row.category_id.map(CategoryId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductListRow {
    id: i32,
    name: String,
    price: i32,
    status: Option<ProductStatus>,
    is_active: bool,
    category_name: Option<String>,
    tag_names: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<ProductListRow> for ProductListItem {
    fn from(row: ProductListRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: Price::from_minor(row.price),
            status: row.status,
            is_active: row.is_active,
            category_name: row.category_name,
            tag_names: row.tag_names,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Query Building
// =============================================================================

/// Append the `WHERE` clause for the products table filters.
///
/// Expects the products table to be aliased as `p`. Date bounds compare the
/// UTC calendar date of `created_at` and are inclusive.
pub fn push_product_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    qb.push(" WHERE p.deleted_at IS NULL");

    if let Some(status) = filter.status {
        qb.push(" AND p.status = ").push_bind(status);
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND p.category_id = ").push_bind(category_id.as_i32());
    }
    if let Some(from) = filter.created_from {
        qb.push(" AND (p.created_at AT TIME ZONE 'UTC')::date >= ").push_bind(from);
    }
    if let Some(until) = filter.created_until {
        qb.push(" AND (p.created_at AT TIME ZONE 'UTC')::date <= ").push_bind(until);
    }
    if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        qb.push(" AND p.name ILIKE ").push_bind(contains_pattern(name));
    }
}

/// Append `ORDER BY` for the table sort, with `id` as a stable tiebreaker.
pub fn push_product_sort(qb: &mut QueryBuilder<'_, Postgres>, sort: ProductSort) {
    qb.push(" ORDER BY ")
        .push(sort.column.sql())
        .push(" ")
        .push(sort.direction.sql())
        .push(", p.id ")
        .push(sort.direction.sql());
}

/// Append global search conditions: every term must match the name or the
/// description.
pub fn push_search_terms(qb: &mut QueryBuilder<'_, Postgres>, terms: &[String]) {
    qb.push(" WHERE p.deleted_at IS NULL");
    for term in terms {
        let pattern = contains_pattern(term);
        qb.push(" AND (p.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// Split a global search query into terms.
#[must_use]
pub fn search_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(ToString::to_string).collect()
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of the products table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        pagination: Pagination,
    ) -> Result<Page<ProductListItem>, RepositoryError> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        push_product_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(LIST_SELECT);
        push_product_filters(&mut query, filter);
        push_product_sort(&mut query, sort);
        query
            .push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<ProductListRow> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            total,
            pagination,
        })
    }

    /// Get a live product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// IDs of the tags attached to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn tag_ids(&self, id: ProductId) -> Result<Vec<TagId>, RepositoryError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT tag_id FROM product_tag WHERE product_id = $1 ORDER BY tag_id",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(ids.into_iter().map(TagId::new).collect())
    }

    /// Whether a live product other than `ignore` already uses `name`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn name_taken(
        &self,
        name: &str,
        ignore: Option<ProductId>,
    ) -> Result<bool, RepositoryError> {
        let taken: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS(
                SELECT 1 FROM products
                WHERE name = $1
                  AND deleted_at IS NULL
                  AND ($2::int IS NULL OR id <> $2)
            )
            ",
        )
        .bind(name)
        .bind(ignore.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    /// Create a product from form input and attach its tags.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO products (name, price, description, status, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&input.name)
        .bind(input.price.minor_units())
        .bind(&input.description)
        .bind(input.status)
        .bind(input.category_id.map(|id| id.as_i32()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, NAME_TAKEN))?;

        replace_tags(&mut tx, row.id, &input.tag_ids).await?;
        tx.commit().await?;

        tracing::info!(product_id = row.id, name = %row.name, "Product created");
        Ok(row.into())
    }

    /// Insert a factory-generated product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO products (name, price, description, status, is_active, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&product.name)
        .bind(product.price.minor_units())
        .bind(&product.description)
        .bind(product.status)
        .bind(product.is_active)
        .bind(product.category_id.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, NAME_TAKEN))?;

        Ok(row.into())
    }

    /// Update a product from form input and replace its tags.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Conflict` if the name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE products
            SET name = $2, price = $3, description = $4, status = $5,
                category_id = $6, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id.as_i32())
        .bind(&input.name)
        .bind(input.price.minor_units())
        .bind(&input.description)
        .bind(input.status)
        .bind(input.category_id.map(|id| id.as_i32()))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, NAME_TAKEN))?
        .ok_or(RepositoryError::NotFound)?;

        replace_tags(&mut tx, row.id, &input.tag_ids).await?;
        tx.commit().await?;

        tracing::info!(product_id = row.id, "Product updated");
        Ok(row.into())
    }

    /// Flip `is_active`, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn toggle_active(&self, id: ProductId) -> Result<bool, RepositoryError> {
        sqlx::query_scalar(
            r"
            UPDATE products
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING is_active
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Set (or clear) the status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status(
        &self,
        id: ProductId,
        status: Option<ProductStatus>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.as_i32())
        .bind(status)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Soft-delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn soft_delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let deleted = self.soft_delete_many(&[id]).await?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Soft-delete several products, returning how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn soft_delete_many(&self, ids: &[ProductId]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<i32> = ids.iter().map(ProductId::as_i32).collect();

        let result = sqlx::query(
            r"
            UPDATE products
            SET deleted_at = NOW()
            WHERE id = ANY($1) AND deleted_at IS NULL
            ",
        )
        .bind(&ids)
        .execute(self.pool)
        .await?;

        tracing::info!(requested = ids.len(), deleted = result.rows_affected(), "Products soft-deleted");
        Ok(result.rows_affected())
    }

    /// Global search over name and description.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SearchHit>, RepositoryError> {
        let terms = search_terms(query);
        if terms.is_empty() {
            return Ok(vec![]);
        }

        let mut qb = QueryBuilder::new("SELECT p.id, p.name FROM products p");
        push_search_terms(&mut qb, &terms);
        qb.push(" ORDER BY p.name LIMIT ").push_bind(limit);

        let rows: Vec<(i32, String)> = qb.build_query_as().fetch_all(self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| {
                let id = ProductId::new(id);
                SearchHit {
                    id,
                    title: name,
                    url: format!("/products/{id}"),
                }
            })
            .collect())
    }

    /// Names of every live product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn live_names(&self) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar("SELECT name FROM products WHERE deleted_at IS NULL")
            .fetch_all(self.pool)
            .await?;
        Ok(names)
    }

    /// Every live product's ID and price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all_prices(&self) -> Result<Vec<ProductPrice>, RepositoryError> {
        let rows: Vec<(i32, i32)> = sqlx::query_as(
            "SELECT id, price FROM products WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, price)| ProductPrice {
                id: ProductId::new(id),
                price: Price::from_minor(price),
            })
            .collect())
    }
}

/// Replace a product's tag set inside a transaction.
async fn replace_tags(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    product_id: i32,
    tag_ids: &[TagId],
) -> Result<(), RepositoryError> {
    let tag_ids: Vec<i32> = tag_ids.iter().map(TagId::as_i32).collect();

    sqlx::query("DELETE FROM product_tag WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        r"
        INSERT INTO product_tag (product_id, tag_id)
        SELECT $1, tag_id FROM UNNEST($2::int[]) AS tag_id
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(product_id)
    .bind(&tag_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
