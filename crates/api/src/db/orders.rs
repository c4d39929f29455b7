//! Order repository: read-side queries.
//!
//! Order *placement* is the transactional workflow in
//! [`crate::services::orders`]; this repository only reads orders back,
//! resolving line items against the current catalog.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bazaar_core::{OrderId, OrderStatus, ProductId, UserId};

use super::{JoinedProductRow, RepositoryError};
use crate::models::order::{Order, ResolvedOrder, ResolvedOrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    tracking_id: Uuid,
    status: String,
    placed_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            tracking_id: row.tracking_id,
            status: OrderStatus::from(row.status),
            placed_at: row.placed_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: i32,
    product_id: i32,
    quantity: i32,
    #[sqlx(flatten)]
    product: JoinedProductRow,
}

impl OrderItemRow {
    fn into_item(self) -> Result<(OrderId, ResolvedOrderItem), RepositoryError> {
        let product_id = ProductId::new(self.product_id);
        let item = ResolvedOrderItem {
            product_id,
            quantity: self.quantity,
            product: self.product.into_product(product_id)?,
        };
        Ok((OrderId::new(self.order_id), item))
    }
}

/// Repository for order read operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's orders, newest first, with line items resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ResolvedOrder>, RepositoryError> {
        let headers = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, tracking_id, status, placed_at
             FROM orders
             WHERE user_id = $1
             ORDER BY placed_at DESC, id DESC",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let item_rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "SELECT i.order_id, i.product_id, i.quantity, {}
             FROM order_items i
             JOIN orders o ON o.id = i.order_id
             LEFT JOIN products p ON p.id = i.product_id
             WHERE o.user_id = $1
             ORDER BY i.id",
            JoinedProductRow::SELECT
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<OrderId, Vec<ResolvedOrderItem>> = HashMap::new();
        for row in item_rows {
            let (order_id, item) = row.into_item()?;
            items_by_order.entry(order_id).or_default().push(item);
        }

        Ok(headers
            .into_iter()
            .map(|row| {
                let order = Order::from(row);
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                ResolvedOrder { order, items }
            })
            .collect())
    }

    /// Fetch one order by its record ID, with line items resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn get_by_id(
        &self,
        order_id: OrderId,
    ) -> Result<Option<ResolvedOrder>, RepositoryError> {
        let header = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, tracking_id, status, placed_at
             FROM orders WHERE id = $1",
        )
        .bind(order_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "SELECT i.order_id, i.product_id, i.quantity, {}
             FROM order_items i
             LEFT JOIN products p ON p.id = i.product_id
             WHERE i.order_id = $1
             ORDER BY i.id",
            JoinedProductRow::SELECT
        ))
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(|row| row.into_item().map(|(_, item)| item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ResolvedOrder {
            order: Order::from(header),
            items,
        }))
    }
}
