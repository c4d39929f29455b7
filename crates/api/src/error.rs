//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Client-facing bodies are JSON with a `success`
//! flag and a message; internal detail never leaks past the boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order placement failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request made with the guest sentinel or no user at all.
    #[error("Login required")]
    LoginRequired,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error indicates a server-side failure worth capturing.
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Auth(
                    AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenSigning
                )
                | Self::Order(OrderError::Repository(_))
        )
    }

    /// HTTP status for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                // The original API reports bad credentials and duplicate
                // registrations as 400, and clients depend on it.
                AuthError::InvalidCredentials
                | AuthError::UserAlreadyExists
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidUsername(_)
                | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenSigning => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Order(err) => match err {
                OrderError::UserNotFound
                | OrderError::AddressRequired
                | OrderError::EmptyCart => StatusCode::BAD_REQUEST,
                OrderError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::LoginRequired => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Server-side failures collapse to a generic
    /// message so internals are not exposed.
    fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password.".to_owned(),
                AuthError::UserAlreadyExists => "User already exists.".to_owned(),
                AuthError::InvalidEmail(e) => e.to_string(),
                AuthError::InvalidUsername(msg) | AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidToken => "Invalid token.".to_owned(),
                AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenSigning => {
                    "Internal server error".to_owned()
                }
            },
            Self::Order(err) => match err {
                OrderError::UserNotFound => "User not found.".to_owned(),
                OrderError::AddressRequired => {
                    "Please update your address before placing an order.".to_owned()
                }
                OrderError::EmptyCart => "Cart is empty".to_owned(),
                OrderError::Repository(_) => "Error placing order".to_owned(),
            },
            Self::NotFound(what) => format!("{what} not found"),
            Self::LoginRequired => "Login required".to_owned(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // The frontend matches on this exact reason string for the guest
        // sentinel, so it gets its own body shape.
        let body = if matches!(self, Self::LoginRequired) {
            json!({ "success": false, "reason": "LOGIN_REQUIRED" })
        } else {
            json!({ "success": false, "message": self.message() })
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
