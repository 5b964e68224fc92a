//! Seed the catalog with generated data.
//!
//! Products need categories and orders need products: seeding a table whose
//! referenced table is empty fails instead of inserting null references.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::PgPool;

use shelf_admin::factories::{CategoryFactory, OrderFactory, ProductFactory, TagFactory};

use super::CommandError;

/// Counts used by `seed all`.
pub const ALL_CATEGORIES: usize = 5;
pub const ALL_TAGS: usize = 10;
pub const ALL_PRODUCTS: usize = 50;
pub const ALL_ORDERS: usize = 200;
pub const ALL_BACKDATE_DAYS: u32 = 60;

/// Seeded generator when `seed` is given, OS entropy otherwise.
#[must_use]
pub fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Insert `count` categories.
///
/// # Errors
///
/// Returns `CommandError::Factory` if generation or an insert fails.
pub async fn categories(pool: &PgPool, rng: &mut StdRng, count: usize) -> Result<(), CommandError> {
    let created = CategoryFactory::default().create_many(pool, rng, count).await?;
    tracing::info!(count = created.len(), "Seeded categories");
    Ok(())
}

/// Insert `count` tags.
///
/// # Errors
///
/// Returns `CommandError::Factory` if generation or an insert fails.
pub async fn tags(pool: &PgPool, rng: &mut StdRng, count: usize) -> Result<(), CommandError> {
    let created = TagFactory::default().create_many(pool, rng, count).await?;
    tracing::info!(count = created.len(), "Seeded tags");
    Ok(())
}

/// Insert `count` products.
///
/// # Errors
///
/// Returns `CommandError::Factory` if there are no categories or an insert fails.
pub async fn products(pool: &PgPool, rng: &mut StdRng, count: usize) -> Result<(), CommandError> {
    let created = ProductFactory::new().create_many(pool, rng, count).await?;
    tracing::info!(count = created.len(), "Seeded products");
    Ok(())
}

/// Insert `count` orders, optionally backdated.
///
/// # Errors
///
/// Returns `CommandError::Factory` if there are no products or an insert fails.
pub async fn orders(
    pool: &PgPool,
    rng: &mut StdRng,
    count: usize,
    backdate_days: Option<u32>,
) -> Result<(), CommandError> {
    let created = OrderFactory::create_many(pool, rng, count, backdate_days, Utc::now()).await?;
    tracing::info!(count = created.len(), "Seeded orders");
    Ok(())
}

/// Seed every table in dependency order.
///
/// # Errors
///
/// Returns the first `CommandError` encountered.
pub async fn all(pool: &PgPool, rng: &mut StdRng) -> Result<(), CommandError> {
    categories(pool, rng, ALL_CATEGORIES).await?;
    tags(pool, rng, ALL_TAGS).await?;
    products(pool, rng, ALL_PRODUCTS).await?;
    orders(pool, rng, ALL_ORDERS, Some(ALL_BACKDATE_DAYS)).await
}
