//! Order domain types.
//!
//! Orders are immutable snapshots of a cart at placement time. Line items
//! store product reference + quantity only; prices and descriptions are
//! re-resolved against the current catalog at read time, so displayed
//! totals track catalog changes rather than the historical price.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use bazaar_core::{OrderId, OrderStatus, ProductId, UserId};

use super::catalog::Product;

/// An order header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Client-facing random token, distinct from the record ID.
    pub tracking_id: Uuid,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

/// An order line item with its product resolved against the current catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub product: Option<Product>,
}

/// An order with all line items resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<ResolvedOrderItem>,
}

/// The result of a successful order placement.
#[derive(Debug, Clone, Copy)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub tracking_id: Uuid,
}
