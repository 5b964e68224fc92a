//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Stock status of a product.
///
/// Stored in the `product_status` Postgres enum using the human-readable
/// labels as values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "product_status"))]
pub enum ProductStatus {
    #[serde(rename = "in stock")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "in stock"))]
    InStock,
    #[serde(rename = "sold out")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "sold out"))]
    SoldOut,
    #[serde(rename = "coming soon")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "coming soon"))]
    ComingSoon,
}

impl ProductStatus {
    /// Every status, in the order they are offered in forms and filters.
    pub const ALL: [Self; 3] = [Self::InStock, Self::SoldOut, Self::ComingSoon];

    /// The stored value, which doubles as the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in stock",
            Self::SoldOut => "sold out",
            Self::ComingSoon => "coming soon",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid product status: {s}"))
    }
}
