//! Order placement workflow.
//!
//! The one operation here that touches multiple entities: read the user's
//! address, validate the cart, snapshot it into an immutable order, and
//! clear the cart. Everything from the cart lock to the cart clear runs in
//! a single database transaction:
//!
//! - order insert + cart clear commit or roll back together, so there is
//!   no window where an order exists but the cart still holds its items;
//! - the `FOR UPDATE` lock on the cart row serializes concurrent
//!   placements for the same user, so one cart cannot become two orders.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use bazaar_core::{OrderId, OrderStatus, UserId};

use crate::db::RepositoryError;
use crate::models::order::PlacedOrder;

/// Errors from the order placement workflow.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The user ID does not resolve to an account.
    #[error("user not found")]
    UserNotFound,

    /// The user has no postal address on file.
    #[error("please update your address before placing an order")]
    AddressRequired,

    /// The cart is missing or has no line items.
    #[error("cart is empty")]
    EmptyCart,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Service executing the order placement workflow.
pub struct OrderService<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the user's current cart.
    ///
    /// Copies the cart's line items verbatim into a new order with a fresh
    /// tracking identifier, then empties the cart. The cart record itself
    /// survives, ready for the next add.
    ///
    /// # Errors
    ///
    /// - [`OrderError::UserNotFound`] if the user does not exist.
    /// - [`OrderError::AddressRequired`] if the user has no address.
    /// - [`OrderError::EmptyCart`] if the cart is absent or has no items.
    /// - [`OrderError::Repository`] on database failure; the transaction
    ///   rolls back and no order is recorded.
    pub async fn place(&self, user_id: UserId) -> Result<PlacedOrder, OrderError> {
        let mut tx = self.pool.begin().await?;

        // Step 1-2: the user must exist and have an address on file.
        let user: Option<(Option<String>,)> =
            sqlx::query_as("SELECT address FROM users WHERE id = $1")
                .bind(user_id.as_i32())
                .fetch_optional(&mut *tx)
                .await?;

        let Some((address,)) = user else {
            return Err(OrderError::UserNotFound);
        };

        if address.as_deref().is_none_or(|a| a.trim().is_empty()) {
            return Err(OrderError::AddressRequired);
        }

        // Step 3: lock the cart row. A concurrent placement for the same
        // user blocks here and then sees the emptied cart.
        let cart: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM carts WHERE user_id = $1 FOR UPDATE")
                .bind(user_id.as_i32())
                .fetch_optional(&mut *tx)
                .await?;

        let Some((cart_id,)) = cart else {
            return Err(OrderError::EmptyCart);
        };

        let items: Vec<(i32, i32)> = sqlx::query_as(
            "SELECT product_id, quantity FROM cart_items WHERE cart_id = $1 ORDER BY id",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        // Step 4-5: snapshot the cart into an immutable order. Only the
        // product reference and quantity are copied; prices resolve
        // against the catalog at read time.
        let tracking_id = Uuid::new_v4();
        let (order_id,): (i32,) = sqlx::query_as(
            "INSERT INTO orders (user_id, tracking_id, status)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(user_id.as_i32())
        .bind(tracking_id)
        .bind(OrderStatus::placed().as_str())
        .fetch_one(&mut *tx)
        .await?;

        for (product_id, quantity) in &items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity) VALUES ($1, $2, $3)",
            )
            .bind(order_id)
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;
        }

        // Step 6: empty the cart in the same transaction.
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id = %user_id,
            order_id,
            tracking_id = %tracking_id,
            items = items.len(),
            "order placed"
        );

        Ok(PlacedOrder {
            order_id: OrderId::new(order_id),
            tracking_id,
        })
    }
}
