//! Database operations for the Bazaar `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Accounts, password hashes, and postal addresses
//! - `categories` / `products` - Catalog
//! - `carts` / `cart_items` - One cart per user, line items keyed by product
//! - `orders` / `order_items` - Immutable order snapshots
//! - `feedback` - Chatbot survey submissions
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p bazaar-cli -- migrate
//! ```
//!
//! All queries are runtime-checked (`sqlx::query`/`query_as`), so no live
//! database is needed at compile time.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod carts;
pub mod catalog;
pub mod feedback;
pub mod orders;
pub mod users;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username or email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Embedded migrations for the Bazaar schema.
#[must_use]
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Product columns pulled through a LEFT JOIN, aliased `p_*`.
///
/// All columns are null when the line item's product reference is dangling;
/// in that case the line resolves to no product rather than failing.
#[derive(sqlx::FromRow)]
pub(crate) struct JoinedProductRow {
    p_name: Option<String>,
    p_description: Option<String>,
    p_price: Option<rust_decimal::Decimal>,
    p_image: Option<String>,
    p_category_id: Option<i32>,
    p_created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl JoinedProductRow {
    /// Selection list for the aliased product columns.
    pub(crate) const SELECT: &'static str = "p.name        AS p_name,
                    p.description AS p_description,
                    p.price       AS p_price,
                    p.image       AS p_image,
                    p.category_id AS p_category_id,
                    p.created_at  AS p_created_at";

    pub(crate) fn into_product(
        self,
        product_id: bazaar_core::ProductId,
    ) -> Result<Option<crate::models::catalog::Product>, RepositoryError> {
        let (Some(name), Some(description), Some(price), Some(category_id), Some(created_at)) = (
            self.p_name,
            self.p_description,
            self.p_price,
            self.p_category_id,
            self.p_created_at,
        ) else {
            return Ok(None);
        };

        let price = bazaar_core::Price::new(price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Some(crate::models::catalog::Product {
            id: product_id,
            name,
            description,
            price,
            image: self.p_image,
            category_id: bazaar_core::CategoryId::new(category_id),
            created_at,
        }))
    }
}
