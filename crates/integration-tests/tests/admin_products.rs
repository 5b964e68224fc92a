//! Integration tests for the product resource.
//!
//! These tests require a migrated `PostgreSQL` database at
//! `SHELF_DATABASE_URL`.
//!
//! Run with: cargo test -p shelf-integration-tests -- --ignored

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use tower::ServiceExt;

use shelf_admin::db::{
    CategoryRepository, Pagination, ProductRepository, RepositoryError, TagRepository,
};
use shelf_admin::models::{NewProduct, ProductFilter, ProductInput, ProductSort};
use shelf_admin::resources::product::{self, MSG_NAME_TAKEN, MSG_PRICE_NUMERIC, ProductForm};
use shelf_core::{Price, ProductStatus};
use shelf_integration_tests::{test_pool, test_state, unique_name};

fn input(name: &str, price: i32) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        price: Price::from_minor(price),
        description: "<p>Integration test product</p>".to_string(),
        status: Some(ProductStatus::InStock),
        category_id: None,
        tag_ids: vec![],
    }
}

// ============================================================================
// Repository
// ============================================================================

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_create_rejects_duplicate_live_name() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let name = unique_name("Duplicate");

    let first = repo.create(&input(&name, 100)).await.expect("create");
    let err = repo.create(&input(&name, 200)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    // Soft-deleted names can be reused.
    repo.soft_delete(first.id).await.expect("delete");
    repo.create(&input(&name, 300)).await.expect("reuse name");
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_name_taken_ignores_record_being_edited() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let name = unique_name("Editable");
    let created = repo.create(&input(&name, 100)).await.expect("create");

    assert!(repo.name_taken(&name, None).await.expect("query"));
    assert!(!repo.name_taken(&name, Some(created.id)).await.expect("query"));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_created_date_filters() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let name = unique_name("Dated");
    repo.create(&input(&name, 100)).await.expect("create");

    let today = Utc::now().date_naive();
    let cases = [
        (None, None, 1),
        (Some(today), Some(today), 1),
        (Some(today + Duration::days(1)), None, 0),
        (None, Some(today - Duration::days(1)), 0),
    ];

    for (created_from, created_until, expected) in cases {
        let filter = ProductFilter {
            name: Some(name.clone()),
            created_from,
            created_until,
            ..ProductFilter::default()
        };
        let page = repo
            .list(&filter, ProductSort::default(), Pagination::default())
            .await
            .expect("list");
        assert_eq!(page.total, expected, "from {created_from:?} until {created_until:?}");
    }
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_list_excludes_deleted_and_sorts_by_price() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let prefix = unique_name("Sorted");

    let cheap = repo.create(&input(&format!("{prefix} a"), 100)).await.expect("create");
    let dear = repo.create(&input(&format!("{prefix} b"), 900)).await.expect("create");
    let gone = repo.create(&input(&format!("{prefix} c"), 500)).await.expect("create");
    repo.soft_delete_many(&[gone.id]).await.expect("bulk delete");

    let filter = ProductFilter {
        name: Some(prefix),
        ..ProductFilter::default()
    };
    let page = repo
        .list(&filter, ProductSort::default(), Pagination::default())
        .await
        .expect("list");

    let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![dear.id, cheap.id]);
    assert!(repo.get(gone.id).await.expect("get").is_none());
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_inline_edits() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let created = repo
        .create(&input(&unique_name("Inline"), 100))
        .await
        .expect("create");

    assert!(!repo.toggle_active(created.id).await.expect("toggle"));
    assert!(repo.toggle_active(created.id).await.expect("toggle"));

    repo.set_status(created.id, None).await.expect("status");
    let reloaded = repo.get(created.id).await.expect("get").expect("exists");
    assert_eq!(reloaded.status, None);
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_global_search_matches_every_term() {
    let pool = test_pool().await;
    let repo = ProductRepository::new(&pool);
    let marker = uuid::Uuid::new_v4().simple().to_string();

    let created = repo
        .insert(&NewProduct {
            name: format!("Copper kettle {marker}"),
            price: Price::from_minor(4200),
            description: "Whistles when ready".to_string(),
            status: None,
            is_active: true,
            category_id: None,
        })
        .await
        .expect("insert");

    let hits = repo
        .search(&format!("{marker} whistles"), product::GLOBAL_SEARCH_LIMIT)
        .await
        .expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].url, format!("/products/{}", created.id));

    let none = repo
        .search(&format!("{marker} teapot"), product::GLOBAL_SEARCH_LIMIT)
        .await
        .expect("search");
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_tags_relation() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);
    let tags = TagRepository::new(&pool);

    let created = products
        .create(&input(&unique_name("Tagged"), 100))
        .await
        .expect("create");
    let tag = tags.find_or_create(&unique_name("tag")).await.expect("tag");
    let again = tags.find_or_create(&tag.name).await.expect("tag");
    assert_eq!(tag.id, again.id);

    tags.attach(created.id, tag.id).await.expect("attach");
    tags.attach(created.id, tag.id).await.expect("attach is idempotent");
    assert_eq!(tags.for_product(created.id).await.expect("list").len(), 1);

    tags.detach(created.id, tag.id).await.expect("detach");
    assert!(matches!(
        tags.detach(created.id, tag.id).await,
        Err(RepositoryError::NotFound)
    ));
}

// ============================================================================
// Validation & HTTP
// ============================================================================

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_validate_reports_taken_name_with_other_errors() {
    let pool = test_pool().await;
    let name = unique_name("Validated");
    ProductRepository::new(&pool)
        .create(&input(&name, 100))
        .await
        .expect("create");

    let form = ProductForm {
        name: name.clone(),
        price: "cheap".to_string(),
        description: "<p>x</p>".to_string(),
        ..ProductForm::default()
    };
    let errors = product::validate(&pool, &form, None)
        .await
        .expect("query")
        .unwrap_err();
    assert_eq!(errors.get("name"), Some(MSG_NAME_TAKEN));
    assert_eq!(errors.get("price"), Some(MSG_PRICE_NUMERIC));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_store_rerenders_invalid_form() {
    let pool = test_pool().await;
    let app = shelf_admin::app(test_state(pool));

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("name=&price=abc&description="))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("The name field is required."));
    assert!(html.contains("The price field must be a number."));
    assert!(html.contains("The description field is required."));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_store_then_view_shows_raw_price() {
    let pool = test_pool().await;
    let category = CategoryRepository::new(&pool)
        .create(&unique_name("Category"))
        .await
        .expect("category");
    let app = shelf_admin::app(test_state(pool));
    let name = unique_name("Stored");

    let body = format!(
        "name={}&price=123456&description=%3Cp%3EHi%3C%2Fp%3E&status=sold+out&category_id={}",
        name.replace(' ', "+"),
        category.id
    );
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location")
        .to_string();

    let view = Request::builder()
        .uri(&location)
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(view).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("123456"));
    assert!(!html.contains("£1,234.56"));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_missing_product_is_not_found() {
    let pool = test_pool().await;
    let app = shelf_admin::app(test_state(pool));

    let request = Request::builder()
        .uri(format!("/products/{}", i32::MAX))
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
