//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bazaar_core::{ProductId, UserId};

use crate::db::carts::CartRepository;
use crate::error::{AppError, Result};
use crate::models::ResolvedCart;
use crate::state::AppState;

/// Body for both add and remove: which user, which product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub user_id: UserId,
    pub product_id: ProductId,
}

#[derive(Debug, Serialize)]
pub struct CartMessageResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub cart: ResolvedCart,
}

/// Add a product to the user's cart.
///
/// POST /api/cart/add
///
/// Creates the cart on first use and increments the quantity when the
/// product is already in it. The product reference is not validated.
///
/// # Errors
///
/// Returns 500 on store failure.
#[instrument(skip(state), fields(user_id = %req.user_id, product_id = %req.product_id))]
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<CartItemRequest>,
) -> Result<Json<CartMessageResponse>> {
    let carts = CartRepository::new(state.pool());
    carts.add_item(req.user_id, req.product_id).await?;

    Ok(Json(CartMessageResponse {
        success: true,
        message: "Product added to cart",
    }))
}

/// Fetch the user's cart with items resolved against the catalog.
///
/// GET /api/cart/{userId}
///
/// A user who never added anything gets an empty cart, not a 404.
///
/// # Errors
///
/// Returns 500 on store failure.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<CartResponse>> {
    let carts = CartRepository::new(state.pool());
    let cart = carts.get_resolved(user_id).await?;

    Ok(Json(CartResponse {
        success: true,
        cart,
    }))
}

/// Remove a product from the user's cart.
///
/// POST /api/cart/remove
///
/// Removing a product the cart does not hold succeeds as a no-op; only a
/// user with no cart at all gets a 404.
///
/// # Errors
///
/// Returns 404 if the user has no cart, 500 on store failure.
#[instrument(skip(state), fields(user_id = %req.user_id, product_id = %req.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    Json(req): Json<CartItemRequest>,
) -> Result<Json<CartMessageResponse>> {
    let carts = CartRepository::new(state.pool());

    if !carts.remove_item(req.user_id, req.product_id).await? {
        return Err(AppError::NotFound("Cart".to_owned()));
    }

    Ok(Json(CartMessageResponse {
        success: true,
        message: "Product removed from cart",
    }))
}
