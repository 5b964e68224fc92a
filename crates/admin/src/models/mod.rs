//! Domain models for the catalog back-office.

pub mod catalog;
pub mod order;
pub mod product;

pub use catalog::{Category, Tag};
pub use order::{NewOrder, Order};
pub use product::{
    NewProduct, Product, ProductFilter, ProductInput, ProductListItem, ProductPrice, ProductSort,
    SearchHit, SortColumn, SortDirection,
};
