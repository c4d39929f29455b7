//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p bazaar-cli -- migrate
//!
//! # Start the API server
//! cargo run -p bazaar-api
//!
//! # Run integration tests
//! cargo test -p bazaar-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a live server over HTTP; they create their own users with
//! unique emails so that repeated runs against the same database do not
//! collide.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Create an HTTP client for tests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique username/email pair so repeated runs never collide.
#[must_use]
pub fn unique_credentials() -> (String, String) {
    let tag = Uuid::new_v4().simple().to_string();
    let tag = tag.get(..12).unwrap_or(&tag);
    (format!("user_{tag}"), format!("user_{tag}@example.com"))
}

/// Test helper: register a user and return its ID from a follow-up login.
pub async fn register_user(client: &Client, username: &str, email: &str, password: &str) -> i64 {
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to register test user");
    assert!(
        resp.status().is_success(),
        "registration failed: {}",
        resp.status()
    );

    let body = login(client, email, password).await;
    body["user"]["id"].as_i64().expect("user id in login body")
}

/// Test helper: log in and return the response body (token + user).
pub async fn login(client: &Client, email: &str, password: &str) -> Value {
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert!(resp.status().is_success(), "login failed: {}", resp.status());

    resp.json().await.expect("login response body")
}

/// Test helper: set a user's address so orders can be placed.
pub async fn set_address(client: &Client, user_id: i64, address: &str) {
    let base_url = api_base_url();

    let resp = client
        .put(format!("{base_url}/api/users/{user_id}"))
        .json(&json!({ "address": address }))
        .send()
        .await
        .expect("Failed to update address");
    assert!(
        resp.status().is_success(),
        "address update failed: {}",
        resp.status()
    );
}

/// Test helper: create a category, returning its ID. Accepts an existing
/// category with the same name.
pub async fn ensure_category(client: &Client, name: &str) -> i64 {
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/categories"))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create category");

    if resp.status().is_success() {
        let body: Value = resp.json().await.expect("category body");
        return body["category"]["id"].as_i64().expect("category id");
    }

    // Already exists; find it in the list.
    let resp = client
        .get(format!("{base_url}/api/categories"))
        .send()
        .await
        .expect("Failed to list categories");
    let body: Value = resp.json().await.expect("category list body");
    let lowered = name.to_lowercase();

    body["categories"]
        .as_array()
        .expect("categories array")
        .iter()
        .find(|c| c["name"].as_str() == Some(lowered.as_str()))
        .and_then(|c| c["id"].as_i64())
        .expect("existing category id")
}

/// Test helper: create a product in a category, returning its ID.
pub async fn create_product(client: &Client, name: &str, category_id: i64) -> i64 {
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": name,
            "description": "integration test product",
            "price": "19.99",
            "category": category_id,
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert!(
        resp.status().is_success(),
        "product creation failed: {}",
        resp.status()
    );

    let body: Value = resp.json().await.expect("product body");
    body["product"]["id"].as_i64().expect("product id")
}

/// Test helper: add a product to a user's cart.
pub async fn add_to_cart(client: &Client, user_id: i64, product_id: i64) {
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/cart/add"))
        .json(&json!({ "userId": user_id, "productId": product_id }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert!(
        resp.status().is_success(),
        "cart add failed: {}",
        resp.status()
    );
}

/// Test helper: fetch a user's cart body.
pub async fn get_cart(client: &Client, user_id: i64) -> Value {
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/api/cart/{user_id}"))
        .send()
        .await
        .expect("Failed to fetch cart");
    assert!(
        resp.status().is_success(),
        "cart fetch failed: {}",
        resp.status()
    );

    resp.json().await.expect("cart body")
}
