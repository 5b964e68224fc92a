//! Product factory.

use fake::{Fake, faker::name::en::Name};
use rand::{Rng, seq::IndexedRandom};
use sqlx::PgPool;

use shelf_core::{Price, ProductStatus};

use super::{FactoryError, Unique};
use crate::db::{CategoryRepository, ProductRepository};
use crate::models::{Category, NewProduct, Product};

/// Highest generated price, in minor units.
pub const MAX_PRICE: i32 = 10_000;

/// Generates active, in-stock products with unique names and descriptions.
#[derive(Debug)]
pub struct ProductFactory {
    names: Unique,
    descriptions: Unique,
}

impl Default for ProductFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductFactory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: Unique::new("name"),
            descriptions: Unique::new("description"),
        }
    }

    /// Produce one product attribute set.
    ///
    /// The category is picked uniformly from `categories`. Descriptions are
    /// drawn from the same person-name generator as names.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::EmptyTable` if `categories` is empty and
    /// `FactoryError::UniqueExhausted` if no fresh name or description remains.
    pub fn definition<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        categories: &[Category],
    ) -> Result<NewProduct, FactoryError> {
        let category = categories
            .choose(rng)
            .ok_or(FactoryError::EmptyTable("categories"))?;

        let name = self.names.generate(|| Name().fake_with_rng(rng))?;
        let description = self.descriptions.generate(|| Name().fake_with_rng(rng))?;
        let price = Price::from_minor(rng.random_range(0..=MAX_PRICE));

        Ok(NewProduct {
            name,
            price,
            description,
            status: Some(ProductStatus::InStock),
            is_active: true,
            category_id: Some(category.id),
        })
    }

    /// Generate and insert `count` products.
    ///
    /// Names already used by live products are never generated.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if generation or an insert fails.
    pub async fn create_many<R: Rng + ?Sized>(
        &mut self,
        pool: &PgPool,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<Product>, FactoryError> {
        let categories = CategoryRepository::new(pool).list().await?;
        let repo = ProductRepository::new(pool);
        for existing in repo.live_names().await? {
            self.names.reserve(existing);
        }

        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let attributes = self.definition(rng, &categories)?;
            created.push(repo.insert(&attributes).await?);
        }

        Ok(created)
    }
}
