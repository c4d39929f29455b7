//! Authentication route handlers.
//!
//! Registration, login (issuing a 1h bearer token), and token verification.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bazaar_core::{Email, UserId};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Plain success/message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Register a new user.
///
/// POST /api/auth/register
///
/// # Errors
///
/// Returns 400 if the username/email is taken or validation fails.
#[instrument(skip(state, req), fields(username = %req.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let user = auth
        .register(&req.username, &req.email, &req.password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            message: "User registered successfully.".to_owned(),
        }),
    ))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The user summary returned by login.
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: UserId,
    pub username: String,
    pub email: Email,
}

/// Login response: bearer token plus user summary.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: LoginUser,
}

/// Authenticate and issue a bearer token (1h expiry).
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns 400 on invalid credentials; unknown email and wrong password
/// are not distinguished.
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let (user, token) = auth.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: LoginUser {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    }))
}

/// Claims echoed back by token verification.
#[derive(Debug, Serialize)]
pub struct VerifiedUser {
    pub id: UserId,
    pub username: String,
}

/// Token verification response.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: String,
    pub user: VerifiedUser,
}

/// Validate the bearer token from the `Authorization` header.
///
/// GET /api/auth/verify
///
/// Returns 401 with a message when the token is missing or invalid; the
/// rejection comes from the [`RequireAuth`] extractor.
pub async fn verify(RequireAuth(claims): RequireAuth) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        message: "Token is valid.".to_owned(),
        user: VerifiedUser {
            id: claims.user_id(),
            username: claims.username,
        },
    })
}
