//! Data table component types.
//!
//! These types define the configuration for resource tables in the admin panel:
//! columns, filters, row/bulk actions and the empty state.

use serde::{Deserialize, Serialize};

/// How a column renders its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Plain text.
    Text,
    /// Minor units rendered as currency.
    Money,
    /// Inline boolean toggle.
    Toggle,
    /// Inline select editor.
    Select,
    /// List of values rendered as badges.
    Badges,
    /// Timestamp rendered relative to now.
    Since,
}

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Cell renderer.
    pub kind: ColumnKind,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Whether the column has its own search box.
    pub searchable: bool,
    /// Whether the cell content is right-aligned.
    pub align_end: bool,
}

impl TableColumn {
    /// Create a new text column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: ColumnKind::Text,
            sortable: false,
            searchable: false,
            align_end: false,
        }
    }

    /// Set the cell renderer.
    #[must_use]
    pub const fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Make the column sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Give the column its own search box.
    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Right-align the cell content.
    #[must_use]
    pub const fn align_end(mut self) -> Self {
        self.align_end = true;
        self
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Single-select dropdown.
    Select,
    /// Single date picker.
    Date,
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Filter parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Filter type.
    pub filter_type: FilterType,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
}

/// Option for select filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl TableFilter {
    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            options,
        }
    }

    /// Create a date filter.
    #[must_use]
    pub fn date(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Date,
            options: vec![],
        }
    }

    /// Whether this is a select filter (template helper).
    #[must_use]
    pub fn is_select(&self) -> bool {
        self.filter_type == FilterType::Select
    }
}

/// Where the filter form is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiltersLayout {
    /// In a dropdown next to the search box.
    Dropdown,
    /// Inline above the table content.
    AboveContent,
}

/// Per-row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

/// Bulk action definition for data tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAction {
    /// Action key (used in the form action URL).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Phosphor icon class.
    pub icon: String,
    /// Whether this is a destructive action.
    pub destructive: bool,
}

impl BulkAction {
    /// Create a new bulk action.
    #[must_use]
    pub fn new(key: &str, label: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            destructive: false,
        }
    }

    /// Mark this action as destructive.
    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Default sort column key.
    pub default_sort: String,
    /// Whether the default sort is descending.
    pub default_sort_desc: bool,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Filter form placement.
    pub filters_layout: FiltersLayout,
    /// Grid columns used by the filter form.
    pub filter_columns: u8,
    /// Per-row actions.
    pub row_actions: Vec<RowAction>,
    /// Bulk action definitions.
    pub bulk_actions: Vec<BulkAction>,
    /// Icon for empty state.
    pub empty_icon: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Label of the empty-state create action, if offered.
    pub empty_create_label: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            default_sort: String::new(),
            default_sort_desc: false,
            filters: vec![],
            filters_layout: FiltersLayout::Dropdown,
            filter_columns: 2,
            row_actions: vec![],
            bulk_actions: vec![],
            empty_icon: "ph-list".to_string(),
            empty_title: "No items found".to_string(),
            empty_create_label: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the default sort.
    #[must_use]
    pub fn default_sort(mut self, key: &str, descending: bool) -> Self {
        self.default_sort = key.to_string();
        self.default_sort_desc = descending;
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the filter form placement and grid width.
    #[must_use]
    pub const fn filters_layout(mut self, layout: FiltersLayout, columns: u8) -> Self {
        self.filters_layout = layout;
        self.filter_columns = columns;
        self
    }

    /// Add a row action.
    #[must_use]
    pub fn row_action(mut self, action: RowAction) -> Self {
        self.row_actions.push(action);
        self
    }

    /// Add a bulk action.
    #[must_use]
    pub fn bulk_action(mut self, action: BulkAction) -> Self {
        self.bulk_actions.push(action);
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, icon: &str, title: &str, create_label: Option<&str>) -> Self {
        self.empty_icon = icon.to_string();
        self.empty_title = title.to_string();
        self.empty_create_label = create_label.map(ToString::to_string);
        self
    }

    /// Look up a column by key.
    #[must_use]
    pub fn find_column(&self, key: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Keys of the columns with their own search box.
    #[must_use]
    pub fn searchable_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.searchable)
            .map(|c| c.key.as_str())
            .collect()
    }
}
