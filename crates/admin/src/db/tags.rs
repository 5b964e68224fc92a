//! Database operations for tags and the `product_tag` pivot.

use sqlx::PgPool;

use shelf_core::{ProductId, TagId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::Tag;

/// Repository for tag database operations.
pub struct TagRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepository<'a> {
    /// Create a new tag repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All tags, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Tag>, RepositoryError> {
        let rows: Vec<(i32, String)> = sqlx::query_as("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(into_tag).collect())
    }

    /// Tags attached to a product, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_product(&self, product_id: ProductId) -> Result<Vec<Tag>, RepositoryError> {
        let rows: Vec<(i32, String)> = sqlx::query_as(
            r"
            SELECT t.id, t.name
            FROM tags t
            JOIN product_tag pt ON pt.tag_id = t.id
            WHERE pt.product_id = $1
            ORDER BY t.name
            ",
        )
        .bind(product_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(into_tag).collect())
    }

    /// How many of `ids` exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_existing(&self, ids: &[TagId]) -> Result<usize, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<i32> = ids.iter().map(TagId::as_i32).collect();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_one(self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Create a tag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str) -> Result<Tag, RepositoryError> {
        let row: (i32, String) =
            sqlx::query_as("INSERT INTO tags (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(self.pool)
                .await
                .map_err(|e| conflict_on_unique(e, "tag name already exists"))?;

        Ok(into_tag(row))
    }

    /// Find a tag by name, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_or_create(&self, name: &str) -> Result<Tag, RepositoryError> {
        let row: (i32, String) = sqlx::query_as(
            r"
            INSERT INTO tags (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(into_tag(row))
    }

    /// Attach a tag to a product. Attaching twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn attach(&self, product_id: ProductId, tag_id: TagId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO product_tag (product_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(product_id.as_i32())
        .bind(tag_id.as_i32())
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Detach a tag from a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the tag was not attached.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn detach(&self, product_id: ProductId, tag_id: TagId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product_tag WHERE product_id = $1 AND tag_id = $2")
            .bind(product_id.as_i32())
            .bind(tag_id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn into_tag((id, name): (i32, String)) -> Tag {
    Tag {
        id: TagId::new(id),
        name,
    }
}
