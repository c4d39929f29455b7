//! Seed the catalog with sample data for local development.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use bazaar_api::db;

/// One seed product: name, description, price, image path, category name.
const PRODUCTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Product 1",
        "This is Product 1",
        "100.00",
        "assets/product1.jpeg",
        "category a",
    ),
    (
        "Product 2",
        "This is Product 2",
        "250.00",
        "assets/product2.jpeg",
        "category a",
    ),
    (
        "Product 3",
        "This is Product 3",
        "75.50",
        "assets/product3.jpeg",
        "category b",
    ),
];

/// Seed sample categories and products.
///
/// Re-running is safe: categories are upserted by name and products are
/// skipped when a product with the same name already exists. With `clear`
/// set, existing products and categories are deleted first.
///
/// # Errors
///
/// Returns an error if the database URL is missing or a statement fails.
pub async fn run(clear: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    if clear {
        sqlx::query("DELETE FROM products").execute(&pool).await?;
        sqlx::query("DELETE FROM categories").execute(&pool).await?;
        info!("Existing catalog rows deleted.");
    }

    for &(name, description, price, image, category) in PRODUCTS {
        let category_id = upsert_category(&pool, category).await?;
        let price: Decimal = price.parse()?;

        let inserted = sqlx::query(
            "INSERT INTO products (name, description, price, image, category_id)
             SELECT $1, $2, $3, $4, $5
             WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image)
        .bind(category_id)
        .execute(&pool)
        .await?;

        if inserted.rows_affected() > 0 {
            info!(product = name, category, "Seeded product");
        }
    }

    info!("Products seeded.");
    Ok(())
}

/// Insert a category by its (lowercased) name, returning the existing row's
/// ID when it is already there.
async fn upsert_category(pool: &PgPool, name: &str) -> Result<i32, sqlx::Error> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO categories (name) VALUES (lower($1))
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
