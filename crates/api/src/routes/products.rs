//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bazaar_core::{CategoryId, Price};

use crate::db::catalog::{CatalogRepository, NewProduct};
use crate::error::{AppError, Result};
use crate::models::{Product, ProductWithCategory};
use crate::state::AppState;

/// Product creation request body.
///
/// `category` carries the category ID, matching the wire format clients
/// already send.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    pub category: CategoryId,
}

/// Response carrying one product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: Product,
}

/// Response carrying products with categories resolved.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<ProductWithCategory>,
}

/// Response carrying products of one category.
#[derive(Debug, Serialize)]
pub struct CategoryProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

/// Create a product.
///
/// POST /api/products
///
/// The referenced category is checked before persistence, so a bad
/// reference yields a clean 400 rather than a constraint error.
///
/// # Errors
///
/// Returns 400 for an unknown category or a negative price.
#[instrument(skip(state, req), fields(name = %req.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let price =
        Price::new(req.price).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let catalog = CatalogRepository::new(state.pool());

    if !catalog.category_exists(req.category).await? {
        return Err(AppError::BadRequest("Invalid category".to_owned()));
    }

    let product = catalog
        .create_product(&NewProduct {
            name: req.name,
            description: req.description,
            price,
            image: req.image,
            category_id: req.category,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            success: true,
            product,
        }),
    ))
}

/// List all products with category names resolved.
///
/// GET /api/products
///
/// # Errors
///
/// Returns 500 on store failure.
pub async fn list(State(state): State<AppState>) -> Result<Json<ProductListResponse>> {
    let catalog = CatalogRepository::new(state.pool());
    let products = catalog.list_products().await?;

    Ok(Json(ProductListResponse {
        success: true,
        products,
    }))
}

/// List products in one category.
///
/// GET /api/products/category/{categoryId}
///
/// An unknown category yields an empty list.
///
/// # Errors
///
/// Returns 500 on store failure.
#[instrument(skip(state))]
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<CategoryProductsResponse>> {
    let catalog = CatalogRepository::new(state.pool());
    let products = catalog.list_products_by_category(category_id).await?;

    Ok(Json(CategoryProductsResponse {
        success: true,
        products,
    }))
}
