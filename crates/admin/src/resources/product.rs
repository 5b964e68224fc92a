//! The product resource: form, table, infolist, navigation and global search.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use shelf_core::{CategoryId, CurrencyCode, Price, PriceError, ProductId, ProductStatus, TagId};

use super::NavigationItem;
use crate::components::display::yes_no;
use crate::components::{
    BulkAction, ColumnKind, DataTableConfig, FieldErrors, FilterOption, FiltersLayout, FormPairs,
    RowAction, TableColumn, TableFilter,
};
use crate::db::{
    CategoryRepository, Pagination, ProductRepository, RepositoryError, TagRepository,
};
use crate::models::{Category, Product, ProductFilter, ProductInput, ProductSort};

/// Sidebar entry.
pub const NAVIGATION: NavigationItem = NavigationItem {
    label: "Products",
    icon: "heroicon-o-shopping-cart",
    href: "/products",
    sort: 2,
};

/// Attribute used as the record title in search results.
pub const RECORD_TITLE_ATTRIBUTE: &str = "name";

/// Attributes matched by global search.
pub const GLOBALLY_SEARCHABLE_ATTRIBUTES: [&str; 2] = ["name", "description"];

/// Maximum global search results.
pub const GLOBAL_SEARCH_LIMIT: i64 = 5;

/// Currency used by the price column.
pub const CURRENCY: CurrencyCode = CurrencyCode::GBP;

/// Grid columns of the create/edit form.
pub const FORM_COLUMNS: u8 = 4;

pub const MSG_NAME_REQUIRED: &str = "The name field is required.";
pub const MSG_NAME_TAKEN: &str = "The name has already been taken.";
pub const MSG_PRICE_REQUIRED: &str = "The price field is required.";
pub const MSG_PRICE_NUMERIC: &str = "The price field must be a number.";
pub const MSG_DESCRIPTION_REQUIRED: &str = "The description field is required.";
pub const MSG_STATUS_INVALID: &str = "The selected status is invalid.";
pub const MSG_CATEGORY_INVALID: &str = "The selected category is invalid.";
pub const MSG_TAGS_INVALID: &str = "The selected tags is invalid.";

// =============================================================================
// Table
// =============================================================================

/// Products table definition.
#[must_use]
pub fn table_config(categories: &[Category]) -> DataTableConfig {
    let status_options = ProductStatus::ALL
        .iter()
        .map(|s| FilterOption::new(s.as_str(), s.as_str()))
        .collect();
    let category_options = categories
        .iter()
        .map(|c| FilterOption::new(&c.id.to_string(), &c.name))
        .collect();

    DataTableConfig::new("products")
        .column(TableColumn::new("name", "Name").sortable().searchable())
        .column(
            TableColumn::new("price", "Price")
                .kind(ColumnKind::Money)
                .sortable()
                .align_end(),
        )
        .column(TableColumn::new("is_active", "Is active").kind(ColumnKind::Toggle))
        .column(TableColumn::new("status", "Status").kind(ColumnKind::Select))
        .column(TableColumn::new("category.name", "Category name"))
        .column(TableColumn::new("tags.name", "Tags").kind(ColumnKind::Badges))
        .column(TableColumn::new("created_at", "Created at").kind(ColumnKind::Since))
        .default_sort("price", true)
        .filter(TableFilter::select("status", "Status", status_options))
        .filter(TableFilter::select("category", "Category", category_options))
        .filter(TableFilter::date("created_from", "Created from"))
        .filter(TableFilter::date("created_until", "Created until"))
        .filters_layout(FiltersLayout::AboveContent, 4)
        .row_action(RowAction::View)
        .row_action(RowAction::Edit)
        .row_action(RowAction::Delete)
        .bulk_action(BulkAction::new("bulk-delete", "Delete selected", "ph-trash").destructive())
        .empty_state("heroicon-o-shopping-cart", "No products", Some("New product"))
}

/// Table cell text for a price: stored minor units as GBP.
#[must_use]
pub fn table_price(price: Price) -> String {
    price.format(CURRENCY)
}

/// Query parameters of the products table.
#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub created_from: Option<String>,
    pub created_until: Option<String>,
    /// Name column search box.
    pub name: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl TableQuery {
    /// Filter criteria from the query.
    ///
    /// Empty or unparseable values impose no constraint.
    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            status: non_empty(self.status.as_deref()).and_then(|s| s.parse().ok()),
            category_id: non_empty(self.category.as_deref())
                .and_then(|s| s.parse::<i32>().ok())
                .map(CategoryId::new),
            created_from: parse_date(self.created_from.as_deref()),
            created_until: parse_date(self.created_until.as_deref()),
            name: non_empty(self.name.as_deref()).map(str::to_owned),
        }
    }

    /// Requested ordering, defaulting to price descending.
    #[must_use]
    pub fn sort(&self) -> ProductSort {
        ProductSort::from_params(non_empty(self.sort.as_deref()), non_empty(self.dir.as_deref()))
    }

    /// Requested page; malformed numbers fall back to the defaults.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::from_params(
            non_empty(self.page.as_deref()).and_then(|p| p.parse().ok()),
            non_empty(self.per_page.as_deref()).and_then(|p| p.parse().ok()),
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    non_empty(value).and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

// =============================================================================
// Form
// =============================================================================

/// Submitted (or prefilled) form values, kept as text for re-rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub status: String,
    pub category_id: String,
    pub tag_ids: Vec<String>,
}

impl ProductForm {
    /// Read fields from urlencoded pairs. `tags` may repeat.
    #[must_use]
    pub fn from_pairs(pairs: &FormPairs) -> Self {
        Self {
            name: pairs.text("name"),
            price: pairs.text("price"),
            description: pairs.text("description"),
            status: pairs.text("status"),
            category_id: pairs.text("category_id"),
            tag_ids: pairs
                .all("tags")
                .into_iter()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Prefill from a stored product. The price field shows the stored integer.
    #[must_use]
    pub fn from_product(product: &Product, tag_ids: &[TagId]) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            status: product.status.map(|s| s.as_str().to_owned()).unwrap_or_default(),
            category_id: product.category_id.map(|id| id.to_string()).unwrap_or_default(),
            tag_ids: tag_ids.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether `status` is the selected radio option.
    #[must_use]
    pub fn has_status(&self, status: &str) -> bool {
        self.status == status
    }

    /// Whether the category with `id` is selected.
    #[must_use]
    pub fn has_category(&self, id: &CategoryId) -> bool {
        self.category_id == id.to_string()
    }

    /// Whether the tag with `id` is selected.
    #[must_use]
    pub fn has_tag(&self, id: &TagId) -> bool {
        let id = id.to_string();
        self.tag_ids.iter().any(|t| *t == id)
    }

    /// Field-level checks that need no database.
    ///
    /// # Errors
    ///
    /// Returns the collected `FieldErrors` if any field is invalid.
    pub fn validate(&self) -> Result<ProductInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", MSG_NAME_REQUIRED);
        }

        let price = match Price::parse_input(&self.price) {
            Ok(price) => Some(price),
            Err(PriceError::Empty) => {
                errors.add("price", MSG_PRICE_REQUIRED);
                None
            }
            Err(PriceError::NotNumeric(_) | PriceError::OutOfRange(_)) => {
                errors.add("price", MSG_PRICE_NUMERIC);
                None
            }
        };

        if strip_tags(&self.description).trim().is_empty() {
            errors.add("description", MSG_DESCRIPTION_REQUIRED);
        }

        let status = match non_empty(Some(&self.status)) {
            None => None,
            Some(value) => value.parse::<ProductStatus>().map_or_else(
                |_| {
                    errors.add("status", MSG_STATUS_INVALID);
                    None
                },
                Some,
            ),
        };

        let category_id = match non_empty(Some(&self.category_id)) {
            None => None,
            Some(value) => value.parse::<i32>().map_or_else(
                |_| {
                    errors.add("category_id", MSG_CATEGORY_INVALID);
                    None
                },
                |id| Some(CategoryId::new(id)),
            ),
        };

        let mut tag_ids = Vec::with_capacity(self.tag_ids.len());
        for raw in &self.tag_ids {
            match raw.trim().parse::<i32>() {
                Ok(id) if !tag_ids.contains(&TagId::new(id)) => tag_ids.push(TagId::new(id)),
                Ok(_) => {}
                Err(_) => errors.add("tags", MSG_TAGS_INVALID),
            }
        }

        match price {
            Some(price) if errors.is_empty() => Ok(ProductInput {
                name: name.to_owned(),
                price,
                description: self.description.clone(),
                status,
                category_id,
                tag_ids,
            }),
            _ => Err(errors),
        }
    }
}

/// Full form validation: field checks, then checks against stored data.
///
/// The name uniqueness check runs even when other fields are invalid, so the
/// form reports every problem at once. `ignore` is the record being edited.
///
/// # Errors
///
/// Returns `RepositoryError` if a lookup query fails. Invalid input is
/// reported in the inner `Err`.
pub async fn validate(
    pool: &PgPool,
    form: &ProductForm,
    ignore: Option<ProductId>,
) -> Result<Result<ProductInput, FieldErrors>, RepositoryError> {
    match form.validate() {
        Ok(input) => {
            let errors = check_references(pool, &input, ignore).await?;
            Ok(if errors.is_empty() { Ok(input) } else { Err(errors) })
        }
        Err(mut errors) => {
            if !errors.has("name")
                && ProductRepository::new(pool)
                    .name_taken(form.name.trim(), ignore)
                    .await?
            {
                errors.add("name", MSG_NAME_TAKEN);
            }
            Ok(Err(errors))
        }
    }
}

/// Checks against stored data: unique name and existing relations.
///
/// `ignore` is the record being edited.
///
/// # Errors
///
/// Returns `RepositoryError` if a lookup query fails.
pub async fn check_references(
    pool: &PgPool,
    input: &ProductInput,
    ignore: Option<ProductId>,
) -> Result<FieldErrors, RepositoryError> {
    let mut errors = FieldErrors::new();

    if ProductRepository::new(pool)
        .name_taken(&input.name, ignore)
        .await?
    {
        errors.add("name", MSG_NAME_TAKEN);
    }

    if let Some(category_id) = input.category_id
        && !CategoryRepository::new(pool).exists(category_id).await?
    {
        errors.add("category_id", MSG_CATEGORY_INVALID);
    }

    if !input.tag_ids.is_empty()
        && TagRepository::new(pool).count_existing(&input.tag_ids).await? != input.tag_ids.len()
    {
        errors.add("tags", MSG_TAGS_INVALID);
    }

    Ok(errors)
}

/// Text content of rich-text HTML, used for the required check.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ")
}

// =============================================================================
// Infolist
// =============================================================================

/// A label/value row on the view page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfolistEntry {
    pub label: &'static str,
    pub value: String,
}

/// View page entries. The price is the raw stored integer.
#[must_use]
pub fn infolist(product: &Product) -> Vec<InfolistEntry> {
    vec![
        InfolistEntry {
            label: "Name",
            value: product.name.clone(),
        },
        InfolistEntry {
            label: "Price",
            value: product.price.to_string(),
        },
        InfolistEntry {
            label: "Is active",
            value: yes_no(product.is_active).to_owned(),
        },
        InfolistEntry {
            label: "Status",
            value: product
                .status
                .map_or_else(|| "-".to_owned(), |s| s.as_str().to_owned()),
        },
    ]
}

/// View page URL, also the global search result URL.
#[must_use]
pub fn view_url(id: ProductId) -> String {
    format!("/products/{id}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: "Teapot".into(),
            price: "1250".into(),
            description: "<p>Holds tea</p>".into(),
            status: "in stock".into(),
            category_id: "3".into(),
            tag_ids: vec!["1".into(), "2".into(), "1".into()],
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let input = form().validate().unwrap();
        assert_eq!(input.name, "Teapot");
        assert_eq!(input.price.minor_units(), 1250);
        assert_eq!(input.status, Some(ProductStatus::InStock));
        assert_eq!(input.category_id, Some(CategoryId::new(3)));
        assert_eq!(input.tag_ids, vec![TagId::new(1), TagId::new(2)]);
    }

    #[test]
    fn test_validate_required_fields() {
        let errors = ProductForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some(MSG_NAME_REQUIRED));
        assert_eq!(errors.get("price"), Some(MSG_PRICE_REQUIRED));
        assert_eq!(errors.get("description"), Some(MSG_DESCRIPTION_REQUIRED));
        assert!(!errors.has("status"));
    }

    #[test]
    fn test_validate_rejects_non_numeric_price() {
        for bad in ["abc", "12abc", "1,000", "99999999999"] {
            let form = ProductForm {
                price: bad.into(),
                ..form()
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.get("price"), Some(MSG_PRICE_NUMERIC), "{bad}");
        }
    }

    #[test]
    fn test_validate_rounds_fractional_price() {
        let form = ProductForm {
            price: " 12.5 ".into(),
            ..form()
        };
        assert_eq!(form.validate().unwrap().price.minor_units(), 13);
    }

    #[test]
    fn test_validate_empty_rich_text_is_missing() {
        let form = ProductForm {
            description: "<p><br></p>".into(),
            ..form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("description"), Some(MSG_DESCRIPTION_REQUIRED));
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Holds <b>tea</b></p>"), "Holds tea");
        assert_eq!(strip_tags("<p>&nbsp;</p>"), " ");
        assert_eq!(strip_tags("2 < 3"), "2 ");
    }

    #[test]
    fn test_validate_invalid_selections() {
        let form = ProductForm {
            status: "discontinued".into(),
            category_id: "x".into(),
            tag_ids: vec!["y".into()],
            ..form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("status"), Some(MSG_STATUS_INVALID));
        assert_eq!(errors.get("category_id"), Some(MSG_CATEGORY_INVALID));
        assert_eq!(errors.get("tags"), Some(MSG_TAGS_INVALID));
    }

    #[test]
    fn test_validate_optional_fields_may_be_blank() {
        let form = ProductForm {
            status: String::new(),
            category_id: String::new(),
            tag_ids: vec![],
            ..form()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.status, None);
        assert_eq!(input.category_id, None);
        assert!(input.tag_ids.is_empty());
    }

    #[test]
    fn test_from_pairs_collects_tags() {
        let pairs = FormPairs(vec![
            ("name".into(), "Mug".into()),
            ("tags[]".into(), "4".into()),
            ("tags[]".into(), "".into()),
            ("tags[]".into(), "9".into()),
        ]);
        let form = ProductForm::from_pairs(&pairs);
        assert_eq!(form.name, "Mug");
        assert_eq!(form.tag_ids, vec!["4", "9"]);
        assert!(form.has_tag(&TagId::new(9)));
        assert!(!form.has_tag(&TagId::new(5)));
    }

    #[test]
    fn test_table_query_filter() {
        let query = TableQuery {
            status: Some("sold out".into()),
            category: Some("2".into()),
            created_from: Some("2026-01-31".into()),
            created_until: Some("not a date".into()),
            name: Some("  ".into()),
            ..TableQuery::default()
        };
        let filter = query.filter();
        assert_eq!(filter.status, Some(ProductStatus::SoldOut));
        assert_eq!(filter.category_id, Some(CategoryId::new(2)));
        assert_eq!(filter.created_from, NaiveDate::from_ymd_opt(2026, 1, 31));
        assert_eq!(filter.created_until, None);
        assert_eq!(filter.name, None);

        assert_eq!(TableQuery::default().filter(), ProductFilter::default());
    }

    #[test]
    fn test_table_query_sort_and_pagination() {
        let query = TableQuery {
            sort: Some("name".into()),
            page: Some("3".into()),
            per_page: Some("".into()),
            ..TableQuery::default()
        };
        assert_eq!(query.sort(), ProductSort::from_params(Some("name"), None));
        assert_eq!(query.pagination(), Pagination::from_params(Some(3), None));

        let junk = TableQuery {
            page: Some("abc".into()),
            per_page: Some("7".into()),
            ..TableQuery::default()
        };
        assert_eq!(junk.sort(), ProductSort::default());
        assert_eq!(junk.pagination(), Pagination::default());
    }

    #[test]
    fn test_table_config_shape() {
        let config = table_config(&[]);
        let keys: Vec<&str> = config.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "price", "is_active", "status", "category.name", "tags.name", "created_at"]
        );
        assert_eq!(config.searchable_columns(), vec!["name"]);
        assert!(config.find_column("price").unwrap().align_end);
        assert_eq!(config.default_sort, "price");
        assert!(config.default_sort_desc);
        assert_eq!(config.filters.len(), 4);
        assert_eq!(config.filters_layout, FiltersLayout::AboveContent);
        assert_eq!(config.filter_columns, 4);
        assert_eq!(
            config.row_actions,
            vec![RowAction::View, RowAction::Edit, RowAction::Delete]
        );
    }

    #[test]
    fn test_table_price_vs_infolist_price() {
        let product = Product {
            id: ProductId::new(1),
            name: "Kettle".into(),
            price: Price::from_minor(123_456),
            description: String::new(),
            status: None,
            is_active: false,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(table_price(product.price), "£1,234.56");

        let entries = infolist(&product);
        let labels: Vec<&str> = entries.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Name", "Price", "Is active", "Status"]);
        assert_eq!(entries[1].value, "123456");
        assert_eq!(entries[2].value, "No");
        assert_eq!(entries[3].value, "-");
    }

    #[test]
    fn test_navigation_and_search_settings() {
        assert_eq!(NAVIGATION.icon, "heroicon-o-shopping-cart");
        assert_eq!(NAVIGATION.sort, 2);
        assert_eq!(GLOBAL_SEARCH_LIMIT, 5);
        assert_eq!(GLOBALLY_SEARCHABLE_ATTRIBUTES, ["name", "description"]);
        assert_eq!(view_url(ProductId::new(42)), "/products/42");
    }
}
