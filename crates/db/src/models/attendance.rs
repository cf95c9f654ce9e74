//! Attendance (check-in) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use insight_core::types::{DbId, Timestamp};

/// A row from the `attendances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub student_id: DbId,
    pub event_id: DbId,
    pub signed_in_at: Timestamp,
    pub role: Option<String>,
    pub custom_role: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a check-in.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttendance {
    pub student_id: DbId,
    pub event_id: DbId,
    pub role: Option<String>,
    pub custom_role: Option<String>,
}
