//! Order models. Orders are read-only in the back-office apart from seeding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelf_core::{OrderId, Price, ProductId, UserId};

/// A persisted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Purchasing user.
    pub user_id: UserId,
    /// Product ordered.
    pub product_id: ProductId,
    /// Price copied from the product when the order was placed.
    pub price: Price,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// Attribute set for inserting an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub price: Price,
}
