//! Integration tests for user profile management.
//!
//! Run with: cargo test -p bazaar-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use bazaar_integration_tests::{api_base_url, client, register_user, unique_credentials};

#[tokio::test]
#[ignore = "Requires running API server"]
async fn a_profile_never_carries_password_material() {
    let client = client();
    let base_url = api_base_url();
    let (username, email) = unique_credentials();
    let user_id = register_user(&client, &username, &email, "hunter2hunter2").await;

    let resp = client
        .get(format!("{base_url}/api/users/{user_id}"))
        .send()
        .await
        .expect("profile request");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("profile body");
    assert_eq!(body["user"]["username"], username);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn a_partial_update_leaves_other_fields_alone() {
    let client = client();
    let base_url = api_base_url();
    let (username, email) = unique_credentials();
    let user_id = register_user(&client, &username, &email, "hunter2hunter2").await;

    let resp = client
        .put(format!("{base_url}/api/users/{user_id}"))
        .json(&json!({ "firstName": "Priya" }))
        .send()
        .await
        .expect("update request");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("update body");
    assert_eq!(body["user"]["firstName"], "Priya");
    // Untouched fields keep their values.
    assert_eq!(body["user"]["username"], username);
    assert_eq!(body["user"]["email"], email.to_lowercase());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn an_invalid_email_update_is_rejected() {
    let client = client();
    let base_url = api_base_url();
    let (username, email) = unique_credentials();
    let user_id = register_user(&client, &username, &email, "hunter2hunter2").await;

    let resp = client
        .put(format!("{base_url}/api/users/{user_id}"))
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .expect("update request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn deleting_an_account_makes_it_unfetchable() {
    let client = client();
    let base_url = api_base_url();
    let (username, email) = unique_credentials();
    let user_id = register_user(&client, &username, &email, "hunter2hunter2").await;

    let resp = client
        .delete(format!("{base_url}/api/users/{user_id}"))
        .send()
        .await
        .expect("delete request");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/users/{user_id}"))
        .send()
        .await
        .expect("profile request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting again is a 404, not an error.
    let resp = client
        .delete(format!("{base_url}/api/users/{user_id}"))
        .send()
        .await
        .expect("second delete request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
