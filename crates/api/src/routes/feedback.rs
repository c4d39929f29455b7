//! Feedback route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use bazaar_core::FeedbackId;

use crate::db::feedback::FeedbackRepository;
use crate::error::Result;
use crate::models::FeedbackSurvey;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: &'static str,
    pub id: FeedbackId,
}

/// Persist a feedback survey submission.
///
/// POST /api/feedback
///
/// Every field is optional; an entirely empty submission is stored as-is.
///
/// # Errors
///
/// Returns 500 on store failure.
#[instrument(skip(state, survey))]
pub async fn submit(
    State(state): State<AppState>,
    Json(survey): Json<FeedbackSurvey>,
) -> Result<(StatusCode, Json<FeedbackResponse>)> {
    let feedback = FeedbackRepository::new(state.pool());
    let id = feedback.insert(&survey).await?;

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            message: "Feedback saved",
            id,
        }),
    ))
}
