//! Product domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shelf_core::{CategoryId, Price, ProductId, ProductStatus, TagId};

/// A product that has not been soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name, unique among live products.
    pub name: String,
    /// Price in minor units.
    pub price: Price,
    /// Rich-text (HTML) description.
    pub description: String,
    /// Stock status, if one has been chosen.
    pub status: Option<ProductStatus>,
    /// Whether the product is active.
    pub is_active: bool,
    /// Owning category.
    pub category_id: Option<CategoryId>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A product row as shown in the products table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub status: Option<ProductStatus>,
    pub is_active: bool,
    /// Name of the related category, if any.
    pub category_name: Option<String>,
    /// Names of related tags, alphabetical.
    pub tag_names: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The `id`/`price` pair the order factory samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPrice {
    pub id: ProductId,
    pub price: Price,
}

/// A global search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: ProductId,
    /// Record title (the product name).
    pub title: String,
    /// View page URL.
    pub url: String,
}

/// Validated input from the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub status: Option<ProductStatus>,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Vec<TagId>,
}

/// Attribute set for inserting a product directly (used by factories).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub status: Option<ProductStatus>,
    pub is_active: bool,
    pub category_id: Option<CategoryId>,
}

/// Filter criteria for the products table.
///
/// Every `None` field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact status match.
    pub status: Option<ProductStatus>,
    /// Exact category match.
    pub category_id: Option<CategoryId>,
    /// Created on or after this date.
    pub created_from: Option<NaiveDate>,
    /// Created on or before this date.
    pub created_until: Option<NaiveDate>,
    /// Case-insensitive substring match on the name column.
    pub name: Option<String>,
}

/// Sortable columns of the products table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Price,
}

impl SortColumn {
    /// Query parameter value.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
        }
    }

    /// Qualified SQL column.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Name => "p.name",
            Self::Price => "p.price",
        }
    }

    /// Parse a query parameter; unknown columns are rejected.
    #[must_use]
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Table ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for ProductSort {
    /// Most expensive first.
    fn default() -> Self {
        Self {
            column: SortColumn::Price,
            direction: SortDirection::Desc,
        }
    }
}

impl ProductSort {
    /// Build from `sort`/`dir` query parameters.
    ///
    /// An unknown or missing column yields the default sort; a known column
    /// without a direction sorts ascending.
    #[must_use]
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        let Some(column) = sort.and_then(SortColumn::from_param) else {
            return Self::default();
        };
        let direction = match dir {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self { column, direction }
    }

    /// Direction a click on `column`'s header should request next.
    #[must_use]
    pub fn next_direction(self, column: SortColumn) -> SortDirection {
        if self.column == column {
            self.direction.reversed()
        } else {
            SortDirection::Asc
        }
    }
}
