//! Feedback repository.

use sqlx::PgPool;

use bazaar_core::FeedbackId;

use super::RepositoryError;
use crate::models::feedback::FeedbackSurvey;

/// Repository for feedback survey storage.
pub struct FeedbackRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedbackRepository<'a> {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a survey submission and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, survey: &FeedbackSurvey) -> Result<FeedbackId, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO feedback (
                 name, age, gender, occupation, chatbot_version,
                 chat_message, quick_reply, typing_indicator, persistent_menu,
                 information_stamp, session_minimization, conversation_closure,
                 comments
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING id",
        )
        .bind(survey.name.as_deref())
        .bind(survey.age)
        .bind(survey.gender.as_deref())
        .bind(survey.occupation.as_deref())
        .bind(survey.chatbot_version.as_deref())
        .bind(survey.chat_message)
        .bind(survey.quick_reply)
        .bind(survey.typing_indicator)
        .bind(survey.persistent_menu)
        .bind(survey.information_stamp)
        .bind(survey.session_minimization)
        .bind(survey.conversation_closure)
        .bind(survey.comments.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(FeedbackId::new(id))
    }
}
