//! Order factory.

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, seq::IndexedRandom};
use sqlx::PgPool;

use shelf_core::UserId;

use super::FactoryError;
use crate::db::{OrderRepository, ProductRepository};
use crate::models::{NewOrder, Order, ProductPrice};

/// Generates orders against existing products.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderFactory;

impl OrderFactory {
    /// Produce one order attribute set.
    ///
    /// The ordering product and its price come from one random product. The
    /// user id is the id of a second, independent random pick from the same
    /// table. Orders have no user foreign key.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::EmptyTable` if `products` is empty.
    pub fn definition<R: Rng + ?Sized>(
        rng: &mut R,
        products: &[ProductPrice],
    ) -> Result<NewOrder, FactoryError> {
        let product = products
            .choose(rng)
            .ok_or(FactoryError::EmptyTable("products"))?;
        let user = products
            .choose(rng)
            .ok_or(FactoryError::EmptyTable("products"))?;

        Ok(NewOrder {
            user_id: UserId::new(user.id.as_i32()),
            product_id: product.id,
            price: product.price,
        })
    }

    /// Generate and insert `count` orders.
    ///
    /// With `backdate_days`, each order's `created_at` is spread uniformly
    /// over the last `backdate_days` days instead of defaulting to now.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if generation or an insert fails.
    pub async fn create_many<R: Rng + ?Sized>(
        pool: &PgPool,
        rng: &mut R,
        count: usize,
        backdate_days: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Order>, FactoryError> {
        let products = ProductRepository::new(pool).all_prices().await?;
        let repo = OrderRepository::new(pool);

        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let attributes = Self::definition(rng, &products)?;
            let created_at = backdate_days.map(|days| backdated(rng, now, days));
            created.push(repo.insert(&attributes, created_at).await?);
        }

        Ok(created)
    }
}

/// A timestamp uniformly within the `days` days before `now`.
pub fn backdated<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    let window = i64::from(days) * 24 * 3600;
    now - Duration::seconds(rng.random_range(0..=window))
}
