//! Category and tag factories.

use fake::{Fake, faker::lorem::en::Word};
use rand::Rng;
use sqlx::PgPool;

use super::{FactoryError, Unique};
use crate::db::{CategoryRepository, TagRepository};
use crate::models::{Category, Tag};

/// Generates categories with unique single-word names.
#[derive(Debug)]
pub struct CategoryFactory {
    names: Unique,
}

impl Default for CategoryFactory {
    fn default() -> Self {
        Self {
            names: Unique::new("category name"),
        }
    }
}

impl CategoryFactory {
    /// Produce one category name.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::UniqueExhausted` once the word list runs dry.
    pub fn definition<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String, FactoryError> {
        self.names.generate(|| capitalize(Word().fake_with_rng(rng)))
    }

    /// Generate and insert `count` categories.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if generation or an insert fails.
    pub async fn create_many<R: Rng + ?Sized>(
        &mut self,
        pool: &PgPool,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<Category>, FactoryError> {
        let repo = CategoryRepository::new(pool);
        for existing in repo.list().await? {
            self.names.reserve(existing.name);
        }

        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let name = self.definition(rng)?;
            created.push(repo.create(&name).await?);
        }
        Ok(created)
    }
}

/// Generates tags with unique lowercase single-word names.
#[derive(Debug)]
pub struct TagFactory {
    names: Unique,
}

impl Default for TagFactory {
    fn default() -> Self {
        Self {
            names: Unique::new("tag name"),
        }
    }
}

impl TagFactory {
    /// Produce one tag name.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::UniqueExhausted` once the word list runs dry.
    pub fn definition<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String, FactoryError> {
        self.names.generate(|| Word().fake_with_rng(rng))
    }

    /// Generate and insert `count` tags.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if generation or an insert fails.
    pub async fn create_many<R: Rng + ?Sized>(
        &mut self,
        pool: &PgPool,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<Tag>, FactoryError> {
        let repo = TagRepository::new(pool);
        for existing in repo.list().await? {
            self.names.reserve(existing.name);
        }

        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let name = self.definition(rng)?;
            created.push(repo.create(&name).await?);
        }
        Ok(created)
    }
}

fn capitalize(word: String) -> String {
    let mut chars = word.chars();
    chars.next().map_or(word.clone(), |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_category_names_capitalized_and_unique() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut factory = CategoryFactory::default();
        let names: Vec<String> = (0..20).map(|_| factory.definition(&mut rng).unwrap()).collect();
        for name in &names {
            assert!(name.chars().next().unwrap().is_uppercase());
        }
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_tag_names_nonempty() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut factory = TagFactory::default();
        assert!(!factory.definition(&mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("mug".to_owned()), "Mug");
        assert_eq!(capitalize(String::new()), "");
    }
}
