//! Category route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::{RepositoryError, catalog::CatalogRepository};
use crate::error::{AppError, Result};
use crate::models::Category;
use crate::state::AppState;

/// Category creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response carrying one category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub category: Category,
}

/// Response carrying all categories.
#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

/// Create a category.
///
/// POST /api/categories
///
/// # Errors
///
/// Returns 400 if the name is blank or already taken.
#[instrument(skip(state, req), fields(name = %req.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("category name is required".to_owned()));
    }

    let catalog = CatalogRepository::new(state.pool());

    let category = catalog
        .create_category(name, req.image.as_deref())
        .await
        .map_err(|e| match e {
            // Schema violations surface as 400s, matching the original API.
            RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Database(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            success: true,
            category,
        }),
    ))
}

/// List all categories.
///
/// GET /api/categories
///
/// # Errors
///
/// Returns 500 on store failure.
pub async fn list(State(state): State<AppState>) -> Result<Json<CategoryListResponse>> {
    let catalog = CatalogRepository::new(state.pool());
    let categories = catalog.list_categories().await?;

    Ok(Json(CategoryListResponse {
        success: true,
        categories,
    }))
}
