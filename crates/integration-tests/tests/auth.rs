//! Integration tests for registration, login, and token verification.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p bazaar-api)
//!
//! Run with: cargo test -p bazaar-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use bazaar_integration_tests::{api_base_url, client, login, unique_credentials};

#[tokio::test]
#[ignore = "Requires running API server"]
async fn register_then_login_issues_a_token() {
    let client = client();
    let base_url = api_base_url();
    let (username, email) = unique_credentials();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({
            "username": username,
            "email": email,
            "password": "hunter2hunter2",
        }))
        .send()
        .await
        .expect("register request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = login(&client, &email, "hunter2hunter2").await;
    assert_eq!(body["success"], true);
    assert!(
        body["token"].as_str().is_some_and(|t| !t.is_empty()),
        "login body should carry a token"
    );
    assert_eq!(body["user"]["username"], username);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn duplicate_registration_is_a_bad_request() {
    let client = client();
    let base_url = api_base_url();
    let (username, email) = unique_credentials();

    let register = || {
        client
            .post(format!("{base_url}/api/auth/register"))
            .json(&json!({
                "username": username,
                "email": email,
                "password": "hunter2hunter2",
            }))
            .send()
    };

    let first = register().await.expect("first register");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = register().await.expect("second register");
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = second.json().await.expect("error body");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn wrong_password_is_a_bad_request() {
    let client = client();
    let base_url = api_base_url();
    let (username, email) = unique_credentials();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({
            "username": username,
            "email": email,
            "password": "hunter2hunter2",
        }))
        .send()
        .await
        .expect("register request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn verify_accepts_a_fresh_token_and_rejects_garbage() {
    let client = client();
    let base_url = api_base_url();
    let (username, email) = unique_credentials();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({
            "username": username,
            "email": email,
            "password": "hunter2hunter2",
        }))
        .send()
        .await
        .expect("register request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = login(&client, &email, "hunter2hunter2").await;
    let token = body["token"].as_str().expect("token");

    let resp = client
        .get(format!("{base_url}/api/auth/verify"))
        .bearer_auth(token)
        .send()
        .await
        .expect("verify request");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/auth/verify"))
        .bearer_auth("not.a.token")
        .send()
        .await
        .expect("verify request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("{base_url}/api/auth/verify"))
        .send()
        .await
        .expect("verify request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
