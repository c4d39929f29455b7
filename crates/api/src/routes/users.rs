//! User profile route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bazaar_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::{ProfileUpdate, UserRepository};
use crate::error::{AppError, Result};
use crate::models::UserProfile;
use crate::state::AppState;

/// Profile update request. Omitted fields keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Fetch a user's profile.
///
/// GET /api/users/{id}
///
/// # Errors
///
/// Returns 404 when no such user exists, 500 on store failure.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>> {
    let users = UserRepository::new(state.pool());

    let user = users
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_owned()))?;

    Ok(Json(UserResponse {
        success: true,
        user: UserProfile::from(user),
    }))
}

/// Update profile fields, leaving unspecified fields untouched.
///
/// PUT /api/users/{id}
///
/// # Errors
///
/// Returns 400 for an invalid email or a username/email collision, 404
/// when no such user exists, 500 on store failure.
#[instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let email = req
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let update = ProfileUpdate {
        username: req.username,
        email,
        first_name: req.first_name,
        last_name: req.last_name,
        address: req.address,
    };

    let users = UserRepository::new(state.pool());

    let user = users
        .update_profile(id, &update)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Database(other),
        })?
        .ok_or_else(|| AppError::NotFound("User".to_owned()))?;

    Ok(Json(UserResponse {
        success: true,
        user: UserProfile::from(user),
    }))
}

/// Delete a user account.
///
/// DELETE /api/users/{id}
///
/// # Errors
///
/// Returns 404 when no such user exists, 500 on store failure.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<MessageResponse>> {
    let users = UserRepository::new(state.pool());

    if !users.delete(id).await? {
        return Err(AppError::NotFound("User".to_owned()));
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "User account deleted successfully",
    }))
}
