//! Feedback entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use insight_core::types::{DbId, Timestamp};

/// A row from the `feedback` table. Feedback is never updated after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub attendance_id: DbId,
    pub rating: Option<i32>,
    pub recommend_score: Option<i32>,
    pub heard_via_option_id: Option<DbId>,
    pub custom_heard_via: Option<String>,
    pub open_ended: serde_json::Value,
    pub submitted_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting feedback. Values are validated by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedback {
    pub attendance_id: DbId,
    pub rating: Option<i32>,
    pub recommend_score: Option<i32>,
    pub heard_via_option_id: Option<DbId>,
    pub custom_heard_via: Option<String>,
    pub open_ended: serde_json::Value,
}
