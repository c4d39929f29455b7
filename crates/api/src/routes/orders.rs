//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use bazaar_core::{OrderId, UserId};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::ResolvedOrder;
use crate::services::orders::OrderService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub message: &'static str,
    pub order_id: OrderId,
    pub tracking_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<ResolvedOrder>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: ResolvedOrder,
}

/// Clients that never logged in send a literal "guest" (or nothing) where
/// a user ID belongs. Those get a `LOGIN_REQUIRED` response rather than a
/// parse error.
fn parse_user_id(raw: &str) -> Result<UserId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("guest") {
        return Err(AppError::LoginRequired);
    }
    trimmed
        .parse::<i32>()
        .map(UserId::new)
        .map_err(|_| AppError::BadRequest(format!("Invalid user id: {trimmed}")))
}

/// Place an order from the user's current cart.
///
/// POST /api/orders/place
///
/// # Errors
///
/// Returns 400 when the user is missing, has no address, or has an empty
/// cart; 500 on store failure.
#[instrument(skip(state), fields(user_id = %req.user_id))]
pub async fn place(
    State(state): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>)> {
    let service = OrderService::new(state.pool());
    let placed = service.place(req.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            success: true,
            message: "Order placed successfully",
            order_id: placed.order_id,
            tracking_id: placed.tracking_id,
        }),
    ))
}

/// List a user's orders, newest first.
///
/// GET /api/orders/by-user/{userId}
///
/// # Errors
///
/// Returns 401 `LOGIN_REQUIRED` for the guest sentinel, 400 for a
/// malformed user ID, 500 on store failure.
#[instrument(skip(state))]
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<OrderListResponse>> {
    let user_id = parse_user_id(&user_id)?;

    let orders = OrderRepository::new(state.pool());
    let orders = orders.list_by_user(user_id).await?;

    Ok(Json(OrderListResponse {
        success: true,
        orders,
    }))
}

/// Fetch one order by its record ID.
///
/// GET /api/orders/by-id/{orderId}
///
/// # Errors
///
/// Returns 404 when no such order exists, 500 on store failure.
#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let orders = OrderRepository::new(state.pool());

    let order = orders
        .get_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_owned()))?;

    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_sentinel_requires_login() {
        assert!(matches!(parse_user_id("guest"), Err(AppError::LoginRequired)));
        assert!(matches!(parse_user_id("GUEST"), Err(AppError::LoginRequired)));
        assert!(matches!(parse_user_id("  guest  "), Err(AppError::LoginRequired)));
        assert!(matches!(parse_user_id(""), Err(AppError::LoginRequired)));
        assert!(matches!(parse_user_id("   "), Err(AppError::LoginRequired)));
    }

    #[test]
    fn numeric_ids_parse() {
        assert!(matches!(parse_user_id("42"), Ok(id) if id == UserId::new(42)));
        assert!(matches!(parse_user_id(" 7 "), Ok(id) if id == UserId::new(7)));
    }

    #[test]
    fn garbage_ids_are_rejected_as_bad_requests() {
        assert!(matches!(parse_user_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(
            parse_user_id("12abc"),
            Err(AppError::BadRequest(_))
        ));
    }
}
