//! Product resource route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::instrument;

use shelf_core::{ProductId, ProductStatus};

use super::{Shell, render};
use crate::components::display::since;
use crate::components::{
    BulkAction, ColumnKind, DataTableConfig, FieldErrors, FormPairs, RowAction, TableFilter,
};
use crate::db::{
    CategoryRepository, DEFAULT_PER_PAGE, PER_PAGE_OPTIONS, Page, Pagination, ProductRepository,
    RepositoryError, TagRepository,
};
use crate::error::AppError;
use crate::models::{Category, ProductListItem, ProductSort, SortColumn, SortDirection, Tag};
use crate::resources::product::{
    self, FORM_COLUMNS, InfolistEntry, MSG_NAME_TAKEN, MSG_STATUS_INVALID, ProductForm,
    TableQuery, table_price, view_url,
};
use crate::state::AppState;

// =============================================================================
// View models
// =============================================================================

/// Option in a select, radio group or multi-select.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Filter field above the table.
#[derive(Debug, Clone)]
pub struct FilterView {
    pub key: String,
    pub label: String,
    pub is_select: bool,
    pub value: String,
    pub options: Vec<OptionView>,
}

/// Table column header.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub label: String,
    pub sortable: bool,
    /// Link that applies the next sort, empty when not sortable.
    pub href: String,
    /// Arrow for the active sort column, empty otherwise.
    pub indicator: &'static str,
    pub align_end: bool,
    /// Name of the column search input, empty when not searchable.
    pub search_key: String,
    pub search_value: String,
}

/// Row action button.
#[derive(Debug, Clone)]
pub struct ActionView {
    pub label: &'static str,
    pub href: String,
    /// Submitted as a POST form rather than followed as a link.
    pub post: bool,
    pub destructive: bool,
}

/// One table cell.
#[derive(Debug, Clone)]
pub struct CellView {
    pub kind: ColumnKind,
    pub text: String,
    pub align_end: bool,
    pub on: bool,
    pub badges: Vec<String>,
    pub options: Vec<OptionView>,
    pub action: String,
}

impl CellView {
    fn text(text: String, align_end: bool) -> Self {
        Self {
            kind: ColumnKind::Text,
            text,
            align_end,
            on: false,
            badges: vec![],
            options: vec![],
            action: String::new(),
        }
    }

    #[must_use]
    pub fn is_toggle(&self) -> bool {
        self.kind == ColumnKind::Toggle
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        self.kind == ColumnKind::Select
    }

    #[must_use]
    pub fn is_badges(&self) -> bool {
        self.kind == ColumnKind::Badges
    }
}

/// One table row.
#[derive(Debug, Clone)]
pub struct RowView {
    pub id: i32,
    pub cells: Vec<CellView>,
    pub actions: Vec<ActionView>,
}

/// Pager under the table.
#[derive(Debug, Clone)]
pub struct PagerView {
    pub total: i64,
    pub page: u32,
    pub last_page: u32,
    pub previous_href: String,
    pub next_href: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub per_page: Vec<OptionView>,
}

/// Hidden input carried by the filter form.
#[derive(Debug, Clone)]
pub struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Products table page.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub shell: Shell,
    pub filters: Vec<FilterView>,
    pub filter_columns: u8,
    pub hidden: Vec<HiddenField>,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub bulk_actions: Vec<BulkAction>,
    pub return_to: String,
    pub pager: PagerView,
    pub empty_icon: String,
    pub empty_title: String,
    pub empty_create_label: String,
}

/// Create/edit form page.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub shell: Shell,
    pub heading: String,
    pub action: String,
    pub cancel_href: String,
    pub form_columns: u8,
    pub form: ProductForm,
    pub errors: FieldErrors,
    pub statuses: Vec<OptionView>,
    pub categories: Vec<OptionView>,
    pub tags: Vec<OptionView>,
}

/// Tag row in the relation manager.
#[derive(Debug, Clone)]
pub struct TagView {
    pub name: String,
    pub detach_action: String,
}

/// View page with the tags relation manager.
#[derive(Template)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub shell: Shell,
    pub heading: String,
    pub entries: Vec<InfolistEntry>,
    pub edit_href: String,
    pub delete_action: String,
    pub tags: Vec<TagView>,
    pub attachable: Vec<OptionView>,
    pub attach_action: String,
}

// =============================================================================
// Table
// =============================================================================

/// Link to the products table with the given ordering and page.
#[must_use]
pub fn list_href(query: &TableQuery, sort: ProductSort, pagination: Pagination) -> String {
    let mut params = url::form_urlencoded::Serializer::new(String::new());
    let filters = [
        ("status", &query.status),
        ("category", &query.category),
        ("created_from", &query.created_from),
        ("created_until", &query.created_until),
        ("name", &query.name),
    ];
    for (key, value) in filters {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            params.append_pair(key, value);
        }
    }
    if sort != ProductSort::default() {
        params.append_pair("sort", sort.column.key());
        params.append_pair("dir", sort.direction.key());
    }
    if pagination.per_page != DEFAULT_PER_PAGE {
        params.append_pair("per_page", &pagination.per_page.to_string());
    }
    if pagination.page > 1 {
        params.append_pair("page", &pagination.page.to_string());
    }

    let params = params.finish();
    if params.is_empty() {
        "/products".to_string()
    } else {
        format!("/products?{params}")
    }
}

/// Only redirect back into the products table.
fn return_target(return_to: Option<&str>) -> String {
    match return_to {
        Some(path) if path.starts_with("/products") && !path.starts_with("//") => path.to_string(),
        _ => "/products".to_string(),
    }
}

fn filter_views(config: &DataTableConfig, query: &TableQuery) -> Vec<FilterView> {
    config
        .filters
        .iter()
        .map(|filter: &TableFilter| {
            let value = match filter.key.as_str() {
                "status" => query.status.clone(),
                "category" => query.category.clone(),
                "created_from" => query.created_from.clone(),
                "created_until" => query.created_until.clone(),
                _ => None,
            }
            .unwrap_or_default();

            FilterView {
                key: filter.key.clone(),
                label: filter.label.clone(),
                is_select: filter.is_select(),
                options: filter
                    .options
                    .iter()
                    .map(|o| OptionView {
                        value: o.value.clone(),
                        label: o.label.clone(),
                        selected: o.value == value,
                    })
                    .collect(),
                value,
            }
        })
        .collect()
}

fn header_views(config: &DataTableConfig, query: &TableQuery, sort: ProductSort) -> Vec<HeaderView> {
    config
        .columns
        .iter()
        .map(|column| {
            let sort_column = column
                .sortable
                .then(|| SortColumn::from_param(&column.key))
                .flatten();
            let href = sort_column.map_or_else(String::new, |c| {
                let next = ProductSort {
                    column: c,
                    direction: sort.next_direction(c),
                };
                let first_page = Pagination {
                    page: 1,
                    ..query.pagination()
                };
                list_href(query, next, first_page)
            });
            let indicator = match sort_column {
                Some(c) if c == sort.column => match sort.direction {
                    SortDirection::Asc => "▲",
                    SortDirection::Desc => "▼",
                },
                _ => "",
            };

            HeaderView {
                label: column.label.clone(),
                sortable: sort_column.is_some(),
                href,
                indicator,
                align_end: column.align_end,
                search_key: if column.searchable {
                    column.key.clone()
                } else {
                    String::new()
                },
                search_value: if column.searchable {
                    query.name.clone().unwrap_or_default()
                } else {
                    String::new()
                },
            }
        })
        .collect()
}

fn row_view(
    config: &DataTableConfig,
    item: &ProductListItem,
    now: chrono::DateTime<Utc>,
) -> RowView {
    let id = item.id;
    let cells = config
        .columns
        .iter()
        .map(|column| match column.kind {
            ColumnKind::Money => CellView::text(table_price(item.price), column.align_end),
            ColumnKind::Toggle => CellView {
                kind: ColumnKind::Toggle,
                on: item.is_active,
                action: format!("/products/{id}/toggle-active"),
                ..CellView::text(String::new(), column.align_end)
            },
            ColumnKind::Select => CellView {
                kind: ColumnKind::Select,
                options: status_options(item.status),
                action: format!("/products/{id}/status"),
                ..CellView::text(String::new(), column.align_end)
            },
            ColumnKind::Badges => CellView {
                kind: ColumnKind::Badges,
                badges: item.tag_names.clone(),
                ..CellView::text(String::new(), column.align_end)
            },
            ColumnKind::Since => CellView::text(since(item.created_at, now), column.align_end),
            ColumnKind::Text => {
                let text = match column.key.as_str() {
                    "name" => item.name.clone(),
                    "category.name" => item.category_name.clone().unwrap_or_default(),
                    _ => String::new(),
                };
                CellView::text(text, column.align_end)
            }
        })
        .collect();

    let actions = config
        .row_actions
        .iter()
        .map(|action| match action {
            RowAction::View => ActionView {
                label: action.label(),
                href: view_url(id),
                post: false,
                destructive: false,
            },
            RowAction::Edit => ActionView {
                label: action.label(),
                href: format!("/products/{id}/edit"),
                post: false,
                destructive: false,
            },
            RowAction::Delete => ActionView {
                label: action.label(),
                href: format!("/products/{id}/delete"),
                post: true,
                destructive: true,
            },
        })
        .collect();

    RowView {
        id: id.as_i32(),
        cells,
        actions,
    }
}

fn status_options(selected: Option<ProductStatus>) -> Vec<OptionView> {
    ProductStatus::ALL
        .iter()
        .map(|s| OptionView {
            value: s.as_str().to_string(),
            label: s.as_str().to_string(),
            selected: selected == Some(*s),
        })
        .collect()
}

fn pager_view(page: &Page<ProductListItem>, query: &TableQuery, sort: ProductSort) -> PagerView {
    let current = page.pagination;
    let at = |n: u32| {
        list_href(
            query,
            sort,
            Pagination {
                page: n,
                ..current
            },
        )
    };

    PagerView {
        total: page.total,
        page: current.page,
        last_page: page.last_page(),
        previous_href: at(current.page.saturating_sub(1).max(1)),
        next_href: at(current.page.saturating_add(1)),
        has_previous: page.has_previous(),
        has_next: page.has_next(),
        per_page: PER_PAGE_OPTIONS
            .iter()
            .map(|n| OptionView {
                value: n.to_string(),
                label: n.to_string(),
                selected: *n == current.per_page,
            })
            .collect(),
    }
}

/// Products table handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> Result<Html<String>, AppError> {
    let pool = state.pool();
    let categories = CategoryRepository::new(pool).list().await?;
    let config = product::table_config(&categories);

    let filter = query.filter();
    let sort = query.sort();
    let pagination = query.pagination();
    let page = ProductRepository::new(pool)
        .list(&filter, sort, pagination)
        .await?;

    let now = Utc::now();
    let mut hidden = vec![];
    if sort != ProductSort::default() {
        hidden.push(HiddenField {
            name: "sort",
            value: sort.column.key().to_string(),
        });
        hidden.push(HiddenField {
            name: "dir",
            value: sort.direction.key().to_string(),
        });
    }

    let template = ProductsIndexTemplate {
        shell: Shell::new(product::NAVIGATION.label, "/products"),
        filters: filter_views(&config, &query),
        filter_columns: config.filter_columns,
        hidden,
        headers: header_views(&config, &query, sort),
        rows: page.items.iter().map(|item| row_view(&config, item, now)).collect(),
        bulk_actions: config.bulk_actions.clone(),
        return_to: list_href(&query, sort, pagination),
        pager: pager_view(&page, &query, sort),
        empty_icon: config.empty_icon.clone(),
        empty_title: config.empty_title.clone(),
        empty_create_label: config.empty_create_label.clone().unwrap_or_default(),
    };

    Ok(render(&template))
}

// =============================================================================
// Create / edit
// =============================================================================

async fn form_page(
    pool: &PgPool,
    heading: String,
    action: String,
    cancel_href: String,
    form: ProductForm,
    errors: FieldErrors,
) -> Result<ProductFormTemplate, AppError> {
    let categories: Vec<Category> = CategoryRepository::new(pool).list().await?;
    let tags: Vec<Tag> = TagRepository::new(pool).list().await?;

    Ok(ProductFormTemplate {
        shell: Shell::new(heading.clone(), "/products"),
        statuses: ProductStatus::ALL
            .iter()
            .map(|s| OptionView {
                value: s.as_str().to_string(),
                label: s.as_str().to_string(),
                selected: form.has_status(s.as_str()),
            })
            .collect(),
        categories: categories
            .iter()
            .map(|c| OptionView {
                value: c.id.to_string(),
                label: c.name.clone(),
                selected: form.has_category(&c.id),
            })
            .collect(),
        tags: tags
            .iter()
            .map(|t| OptionView {
                value: t.id.to_string(),
                label: t.name.clone(),
                selected: form.has_tag(&t.id),
            })
            .collect(),
        heading,
        action,
        cancel_href,
        form_columns: FORM_COLUMNS,
        form,
        errors,
    })
}

fn unprocessable(template: &ProductFormTemplate) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, render(template)).into_response()
}

/// Create form handler.
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = form_page(
        state.pool(),
        "Create Product".to_string(),
        "/products".to_string(),
        "/products".to_string(),
        ProductForm::default(),
        FieldErrors::new(),
    )
    .await?;
    Ok(render(&template))
}

/// Store handler.
#[instrument(skip(state, pairs))]
pub async fn store(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let pool = state.pool();
    let form = ProductForm::from_pairs(&FormPairs(pairs));

    let errors = match product::validate(pool, &form, None).await? {
        Ok(input) => match ProductRepository::new(pool).create(&input).await {
            Ok(created) => return Ok(Redirect::to(&view_url(created.id)).into_response()),
            Err(RepositoryError::Conflict(_)) => {
                let mut errors = FieldErrors::new();
                errors.add("name", MSG_NAME_TAKEN);
                errors
            }
            Err(e) => return Err(e.into()),
        },
        Err(errors) => errors,
    };

    tracing::debug!(fields = errors.iter().count(), "Product create rejected");
    let template = form_page(
        pool,
        "Create Product".to_string(),
        "/products".to_string(),
        "/products".to_string(),
        form,
        errors,
    )
    .await?;
    Ok(unprocessable(&template))
}

/// Edit form handler.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let pool = state.pool();
    let id = ProductId::new(id);
    let repo = ProductRepository::new(pool);
    let found = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let tag_ids = repo.tag_ids(id).await?;

    let template = form_page(
        pool,
        format!("Edit {}", found.name),
        format!("/products/{id}/edit"),
        view_url(id),
        ProductForm::from_product(&found, &tag_ids),
        FieldErrors::new(),
    )
    .await?;
    Ok(render(&template))
}

/// Update handler.
#[instrument(skip(state, pairs))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let pool = state.pool();
    let id = ProductId::new(id);
    let repo = ProductRepository::new(pool);
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let form = ProductForm::from_pairs(&FormPairs(pairs));

    let errors = match product::validate(pool, &form, Some(id)).await? {
        Ok(input) => match repo.update(id, &input).await {
            Ok(updated) => return Ok(Redirect::to(&view_url(updated.id)).into_response()),
            Err(RepositoryError::Conflict(_)) => {
                let mut errors = FieldErrors::new();
                errors.add("name", MSG_NAME_TAKEN);
                errors
            }
            Err(e) => return Err(e.into()),
        },
        Err(errors) => errors,
    };

    let template = form_page(
        pool,
        format!("Edit {}", existing.name),
        format!("/products/{id}/edit"),
        view_url(id),
        form,
        errors,
    )
    .await?;
    Ok(unprocessable(&template))
}

// =============================================================================
// View
// =============================================================================

/// View page handler: infolist plus the tags relation manager.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let pool = state.pool();
    let id = ProductId::new(id);
    let found = ProductRepository::new(pool)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let tag_repo = TagRepository::new(pool);
    let attached = tag_repo.for_product(id).await?;
    let attachable = tag_repo
        .list()
        .await?
        .into_iter()
        .filter(|t| !attached.iter().any(|a| a.id == t.id))
        .map(|t| OptionView {
            value: t.id.to_string(),
            label: t.name,
            selected: false,
        })
        .collect();

    let template = ProductShowTemplate {
        shell: Shell::new(found.name.clone(), "/products"),
        heading: found.name.clone(),
        entries: product::infolist(&found),
        edit_href: format!("/products/{id}/edit"),
        delete_action: format!("/products/{id}/delete"),
        tags: attached
            .into_iter()
            .map(|t| TagView {
                detach_action: format!("/products/{id}/tags/{}/detach", t.id),
                name: t.name,
            })
            .collect(),
        attachable,
        attach_action: format!("/products/{id}/tags"),
    };
    Ok(render(&template))
}

// =============================================================================
// Row, inline and bulk actions
// =============================================================================

/// Where to go after an inline action.
#[derive(Debug, Deserialize)]
pub struct ReturnTo {
    pub return_to: Option<String>,
}

/// Inline status select submission.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    #[serde(default)]
    pub status: String,
    pub return_to: Option<String>,
}

/// Soft delete handler.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let id = ProductId::new(id);
    ProductRepository::new(state.pool()).soft_delete(id).await?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(Redirect::to("/products"))
}

/// Bulk soft delete handler.
#[instrument(skip(state, pairs))]
pub async fn bulk_delete(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let pairs = FormPairs(pairs);
    let ids = pairs
        .all("ids")
        .into_iter()
        .map(|raw| {
            raw.trim()
                .parse::<i32>()
                .map(ProductId::new)
                .map_err(|_| AppError::BadRequest(format!("invalid product id: {raw}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let deleted = ProductRepository::new(state.pool())
        .soft_delete_many(&ids)
        .await?;
    tracing::info!(deleted, "Bulk delete");

    Ok(Redirect::to(&return_target(pairs.first("return_to"))))
}

/// Inline `is_active` toggle handler.
#[instrument(skip(state))]
pub async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<ReturnTo>,
) -> Result<Redirect, AppError> {
    let id = ProductId::new(id);
    let is_active = ProductRepository::new(state.pool())
        .toggle_active(id)
        .await?;
    tracing::info!(product_id = %id, is_active, "Product active flag toggled");
    Ok(Redirect::to(&return_target(input.return_to.as_deref())))
}

/// Inline status select handler.
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<StatusInput>,
) -> Result<Redirect, AppError> {
    let id = ProductId::new(id);
    let status = match input.status.trim() {
        "" => None,
        value => Some(
            value
                .parse::<ProductStatus>()
                .map_err(|_| AppError::BadRequest(MSG_STATUS_INVALID.to_string()))?,
        ),
    };

    ProductRepository::new(state.pool())
        .set_status(id, status)
        .await?;
    tracing::info!(product_id = %id, status = ?status, "Product status changed");
    Ok(Redirect::to(&return_target(input.return_to.as_deref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_href_defaults_are_omitted() {
        assert_eq!(
            list_href(&TableQuery::default(), ProductSort::default(), Pagination::default()),
            "/products"
        );
    }

    #[test]
    fn test_list_href_keeps_filters() {
        let query = TableQuery {
            status: Some("sold out".into()),
            name: Some("tea & co".into()),
            created_until: Some(String::new()),
            ..TableQuery::default()
        };
        let sort = ProductSort {
            column: SortColumn::Name,
            direction: SortDirection::Asc,
        };
        let href = list_href(
            &query,
            sort,
            Pagination {
                page: 2,
                per_page: 25,
            },
        );
        assert_eq!(
            href,
            "/products?status=sold+out&name=tea+%26+co&sort=name&dir=asc&per_page=25&page=2"
        );
    }

    #[test]
    fn test_return_target_stays_in_products() {
        assert_eq!(return_target(Some("/products?page=2")), "/products?page=2");
        assert_eq!(return_target(Some("https://evil.example")), "/products");
        assert_eq!(return_target(Some("//evil.example")), "/products");
        assert_eq!(return_target(None), "/products");
    }

    #[test]
    fn test_headers_link_next_sort() {
        let config = product::table_config(&[]);
        let query = TableQuery::default();
        let headers = header_views(&config, &query, ProductSort::default());

        let name = &headers[0];
        assert!(name.sortable);
        assert_eq!(name.href, "/products?sort=name&dir=asc");
        assert_eq!(name.indicator, "");
        assert_eq!(name.search_key, "name");

        let price = &headers[1];
        assert_eq!(price.indicator, "▼");
        assert_eq!(price.href, "/products?sort=price&dir=asc");
        assert!(price.align_end);

        assert!(!headers[2].sortable);
        assert!(headers[2].href.is_empty());
    }

    #[test]
    fn test_row_view_cells() {
        let config = product::table_config(&[]);
        let now = Utc::now();
        let item = ProductListItem {
            id: ProductId::new(7),
            name: "Kettle".into(),
            price: shelf_core::Price::from_minor(250_000),
            status: Some(ProductStatus::ComingSoon),
            is_active: true,
            category_name: Some("Kitchen".into()),
            tag_names: vec!["new".into(), "steel".into()],
            created_at: now - chrono::Duration::days(3),
        };
        let row = row_view(&config, &item, now);

        assert_eq!(row.id, 7);
        assert_eq!(row.cells[0].text, "Kettle");
        assert_eq!(row.cells[1].text, "£2,500.00");
        assert!(row.cells[1].align_end);
        assert!(row.cells[2].is_toggle() && row.cells[2].on);
        assert!(row.cells[3].is_select());
        assert!(row.cells[3].options.iter().any(|o| o.selected && o.value == "coming soon"));
        assert_eq!(row.cells[4].text, "Kitchen");
        assert_eq!(row.cells[5].badges, vec!["new", "steel"]);
        assert_eq!(row.cells[6].text, "3 days ago");

        let labels: Vec<&str> = row.actions.iter().map(|a| a.label).collect();
        assert_eq!(labels, vec!["View", "Edit", "Delete"]);
        assert!(row.actions[2].post && row.actions[2].destructive);
        assert_eq!(row.actions[0].href, "/products/7");
    }
}
