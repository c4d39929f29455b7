//! Catalog repository: categories and products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use bazaar_core::{CategoryId, Price, ProductId};

use super::RepositoryError;
use crate::models::catalog::{Category, CategoryRef, Product, ProductWithCategory};

/// Fields required to create a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: Option<String>,
    pub category_id: CategoryId,
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            image: row.image,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    image: Option<String>,
    category_id: i32,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            price,
            image: self.image,
            category_id: CategoryId::new(self.category_id),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductWithCategoryRow {
    #[sqlx(flatten)]
    product: ProductRow,
    category_name: String,
}

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a category. The name is stored lowercased.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_category(
        &self,
        name: &str,
        image: Option<&str>,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name, image)
             VALUES (lower($1), $2)
             RETURNING id, name, image, created_at",
        )
        .bind(name)
        .bind(image)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("category name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// List all categories, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, image, created_at FROM categories ORDER BY created_at, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Check whether a category exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category_exists(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let found: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM categories WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Create a product. The category must be validated by the caller
    /// first so clients see `InvalidCategory` rather than a raw
    /// constraint error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_product(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products (name, description, price, image, category_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, description, price, image, category_id, created_at",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price.amount())
        .bind(new.image.as_deref())
        .bind(new.category_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }

    /// List all products with their category names resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list_products(&self) -> Result<Vec<ProductWithCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(
            "SELECT p.id, p.name, p.description, p.price, p.image, p.category_id,
                    p.created_at, c.name AS category_name
             FROM products p
             JOIN categories c ON c.id = p.category_id
             ORDER BY p.created_at, p.id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let category_id = CategoryId::new(row.product.category_id);
                Ok(ProductWithCategory {
                    product: row.product.into_product()?,
                    category: CategoryRef {
                        id: category_id,
                        name: row.category_name,
                    },
                })
            })
            .collect()
    }

    /// List products belonging to one category.
    ///
    /// An unknown category yields an empty list, matching a filter that
    /// simply matches nothing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, image, category_id, created_at
             FROM products
             WHERE category_id = $1
             ORDER BY created_at, id",
        )
        .bind(category_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}
