//! Reusable admin UI building blocks.

pub mod data_table;
pub mod display;
pub mod form;

pub use data_table::{
    BulkAction, ColumnKind, DataTableConfig, FilterOption, FilterType, FiltersLayout, RowAction,
    TableColumn, TableFilter,
};
pub use form::{FieldErrors, FormPairs};
