//! Repository for the `feedback` table.

use sqlx::PgPool;
use insight_core::types::DbId;

use crate::models::feedback::{CreateFeedback, Feedback};

const COLUMNS: &str = "id, attendance_id, rating, recommend_score, heard_via_option_id, \
                       custom_heard_via, open_ended, submitted_at, created_at, updated_at";

/// Provides feedback submission and lookup. Feedback rows are never updated.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert feedback. Fails with `uq_feedback_attendance` if the attendance
    /// already has feedback.
    pub async fn create(pool: &PgPool, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback \
                 (attendance_id, rating, recommend_score, heard_via_option_id, \
                  custom_heard_via, open_ended) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.attendance_id)
            .bind(input.rating)
            .bind(input.recommend_score)
            .bind(input.heard_via_option_id)
            .bind(&input.custom_heard_via)
            .bind(&input.open_ended)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_attendance(
        pool: &PgPool,
        attendance_id: DbId,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback WHERE attendance_id = $1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(attendance_id)
            .fetch_optional(pool)
            .await
    }
}
