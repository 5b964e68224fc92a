//! Test-data factories for the catalog.
//!
//! Each factory produces attribute sets from `fake` generators and a caller
//! supplied RNG, so seeded runs are reproducible. Persisting helpers insert
//! the generated rows through the repositories.

mod catalog;
mod order;
mod product;

use std::collections::HashSet;

use thiserror::Error;

use crate::db::RepositoryError;

pub use catalog::{CategoryFactory, TagFactory};
pub use order::OrderFactory;
pub use product::ProductFactory;

/// Attempts a unique generator makes before giving up.
pub const MAX_UNIQUE_ATTEMPTS: usize = 10_000;

/// Errors raised while generating or persisting factory rows.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// A related table the factory samples from has no rows.
    #[error("cannot pick a random row: the {0} table is empty")]
    EmptyTable(&'static str),

    /// The unique generator ran out of fresh values.
    #[error("maximum retries of {MAX_UNIQUE_ATTEMPTS} reached without finding a unique {0}")]
    UniqueExhausted(&'static str),

    /// Persisting a generated row failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Remembers every value it has handed out and refuses repeats.
#[derive(Debug)]
pub struct Unique {
    attribute: &'static str,
    seen: HashSet<String>,
}

impl Unique {
    #[must_use]
    pub fn new(attribute: &'static str) -> Self {
        Self {
            attribute,
            seen: HashSet::new(),
        }
    }

    /// Draw from `generate` until it yields a value not seen before.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::UniqueExhausted` after [`MAX_UNIQUE_ATTEMPTS`]
    /// consecutive collisions.
    pub fn generate(
        &mut self,
        mut generate: impl FnMut() -> String,
    ) -> Result<String, FactoryError> {
        for _ in 0..MAX_UNIQUE_ATTEMPTS {
            let value = generate();
            if self.seen.insert(value.clone()) {
                return Ok(value);
            }
        }
        Err(FactoryError::UniqueExhausted(self.attribute))
    }

    /// Mark a value as taken without generating it.
    pub fn reserve(&mut self, value: impl Into<String>) {
        self.seen.insert(value.into());
    }

    /// Forget every value handed out so far.
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_rejects_repeats() {
        let mut unique = Unique::new("name");
        let mut values = ["a", "a", "b"].into_iter();
        assert_eq!(unique.generate(|| values.next().unwrap().to_owned()).unwrap(), "a");
        assert_eq!(unique.generate(|| values.next().unwrap().to_owned()).unwrap(), "b");
    }

    #[test]
    fn test_unique_exhausts() {
        let mut unique = Unique::new("name");
        unique.reserve("same");
        let err = unique.generate(|| "same".to_owned()).unwrap_err();
        assert!(matches!(err, FactoryError::UniqueExhausted("name")));
        assert_eq!(
            err.to_string(),
            "maximum retries of 10000 reached without finding a unique name"
        );
    }

    #[test]
    fn test_unique_reset() {
        let mut unique = Unique::new("name");
        unique.reserve("x");
        unique.reset();
        assert_eq!(unique.generate(|| "x".to_owned()).unwrap(), "x");
    }

    #[test]
    fn test_empty_table_message() {
        assert_eq!(
            FactoryError::EmptyTable("categories").to_string(),
            "cannot pick a random row: the categories table is empty"
        );
    }
}
