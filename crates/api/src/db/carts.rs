//! Cart repository for database operations.
//!
//! One cart per user, created lazily on first add. Line items are keyed by
//! `(cart_id, product_id)`, so adding a product already in the cart bumps
//! its quantity instead of appending a second line.

use sqlx::PgPool;

use bazaar_core::{CartId, ProductId, UserId};

use super::{JoinedProductRow, RepositoryError};
use crate::models::cart::{ResolvedCart, ResolvedCartItem};

#[derive(sqlx::FromRow)]
struct CartItemRow {
    product_id: i32,
    quantity: i32,
    #[sqlx(flatten)]
    product: JoinedProductRow,
}

impl CartItemRow {
    fn into_item(self) -> Result<ResolvedCartItem, RepositoryError> {
        let product_id = ProductId::new(self.product_id);
        Ok(ResolvedCartItem {
            product_id,
            quantity: self.quantity,
            product: self.product.into_product(product_id)?,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a product to the user's cart, creating the cart if needed.
    ///
    /// Increments the quantity when the product is already present. The
    /// product reference is deliberately not validated; a dangling
    /// reference resolves to `null` on read.
    ///
    /// Runs as a single statement, so lazy cart creation and the quantity
    /// upsert cannot interleave with a concurrent add.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "WITH cart AS (
                 INSERT INTO carts (user_id) VALUES ($1)
                 ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
                 RETURNING id
             )
             INSERT INTO cart_items (cart_id, product_id, quantity)
             SELECT cart.id, $2, 1 FROM cart
             ON CONFLICT (cart_id, product_id)
             DO UPDATE SET quantity = cart_items.quantity + 1",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove a product from the user's cart.
    ///
    /// Returns `false` if the user has no cart at all. Removing a product
    /// that is not in the cart is a no-op and still returns `true`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let cart: Option<(i32,)> = sqlx::query_as("SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        let Some((cart_id,)) = cart else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(true)
    }

    /// Get the user's cart with line items resolved to product detail.
    ///
    /// A user without a cart gets an empty one; callers cannot tell the
    /// difference, and do not need to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn get_resolved(&self, user_id: UserId) -> Result<ResolvedCart, RepositoryError> {
        let cart: Option<(i32,)> = sqlx::query_as("SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        let Some((cart_id,)) = cart else {
            return Ok(ResolvedCart::empty(user_id));
        };

        let rows = sqlx::query_as::<_, CartItemRow>(&format!(
            "SELECT i.product_id, i.quantity, {}
             FROM cart_items i
             LEFT JOIN products p ON p.id = i.product_id
             WHERE i.cart_id = $1
             ORDER BY i.id",
            JoinedProductRow::SELECT
        ))
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(CartItemRow::into_item)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedCart {
            id: Some(CartId::new(cart_id)),
            user_id,
            items,
        })
    }
}
