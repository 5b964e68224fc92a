//! Integration tests for the orders-per-day widget.
//!
//! These tests require a migrated `PostgreSQL` database at
//! `SHELF_DATABASE_URL`.

use chrono::{Duration, Utc};

use shelf_admin::db::{OrderRepository, ProductRepository};
use shelf_admin::models::{NewOrder, NewProduct};
use shelf_admin::widgets::OrdersPerDay;
use shelf_core::{Price, UserId};
use shelf_integration_tests::{test_pool, unique_name};

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn test_widget_counts_backdated_orders() {
    let pool = test_pool().await;
    let product = ProductRepository::new(&pool)
        .insert(&NewProduct {
            name: unique_name("Widget product"),
            price: Price::from_minor(500),
            description: "widget".to_string(),
            status: None,
            is_active: true,
            category_id: None,
        })
        .await
        .expect("insert product");

    let now = Utc::now();
    let before = OrdersPerDay::load(&pool, now).await.expect("load");
    let before_data = &before.data.datasets[0].data;

    let orders = OrderRepository::new(&pool);
    let order = NewOrder {
        user_id: UserId::new(product.id.as_i32()),
        product_id: product.id,
        price: product.price,
    };
    let three_days_ago = now - Duration::days(3);
    orders.insert(&order, Some(three_days_ago)).await.expect("order");
    orders.insert(&order, Some(three_days_ago)).await.expect("order");
    // Outside the window.
    orders
        .insert(&order, Some(now - Duration::days(90)))
        .await
        .expect("order");

    let after = OrdersPerDay::load(&pool, now).await.expect("load");
    assert_eq!(after.data.labels.len(), 61);

    let label = three_days_ago.date_naive().format("%Y-%m-%d").to_string();
    let index = after
        .data
        .labels
        .iter()
        .position(|l| *l == label)
        .expect("day in window");
    assert_eq!(after.data.datasets[0].data[index], before_data[index] + 2);

    let total_before: i64 = before_data.iter().sum();
    let total_after: i64 = after.data.datasets[0].data.iter().sum();
    assert_eq!(total_after, total_before + 2);
}
