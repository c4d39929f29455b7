//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings database)
//!
//! # Auth
//! POST /api/auth/register          - Create account
//! POST /api/auth/login             - Verify credentials, issue bearer token
//! GET  /api/auth/verify            - Validate bearer token
//!
//! # Catalog
//! POST /api/categories             - Create category
//! GET  /api/categories             - List categories
//! POST /api/products               - Create product (category must exist)
//! GET  /api/products               - List products with category resolved
//! GET  /api/products/category/{categoryId} - Filter by category
//!
//! # Cart
//! POST /api/cart/add               - Add/increment line item
//! GET  /api/cart/{userId}          - Fetch cart with resolved items
//! POST /api/cart/remove            - Remove line item
//!
//! # Orders
//! POST /api/orders/place           - Run the order placement workflow
//! GET  /api/orders/by-user/{userId} - List a user's orders
//! GET  /api/orders/by-id/{orderId}  - Fetch one order
//!
//! # Users
//! GET    /api/users/{id}           - Fetch profile (password excluded)
//! PUT    /api/users/{id}           - Update profile fields
//! DELETE /api/users/{id}           - Delete account
//!
//! # Feedback
//! POST /api/feedback               - Persist a survey record
//! ```

pub mod auth;
pub mod cart;
pub mod categories;
pub mod feedback;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/verify", get(auth::verify))
}

/// Create the catalog routes router (categories + products).
pub fn category_routes() -> Router<AppState> {
    Router::new().route("/", post(categories::create).get(categories::list))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create).get(products::list))
        .route("/category/{categoryId}", get(products::list_by_category))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/{userId}", get(cart::get))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/place", post(orders::place))
        .route("/by-user/{userId}", get(orders::list_by_user))
        .route("/by-id/{orderId}", get(orders::get_by_id))
}

/// Create the user profile routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(users::get).put(users::update).delete(users::delete),
    )
}

/// Create the feedback routes router.
pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/", post(feedback::submit))
}

/// Assemble the full `/api` router.
///
/// When `enforce_auth` is set, the cart and order routers require a valid
/// bearer token; the rest of the surface stays open either way.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let mut cart = cart_routes();
    let mut orders = order_routes();

    if state.config().enforce_auth {
        let layer = axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::require_token,
        );
        cart = cart.layer(layer.clone());
        orders = orders.layer(layer);
    }

    Router::new()
        .nest("/auth", auth_routes())
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart)
        .nest("/orders", orders)
        .nest("/users", user_routes())
        .nest("/feedback", feedback_routes())
}
