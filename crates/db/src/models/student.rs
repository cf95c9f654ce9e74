//! Student entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use insight_core::types::{DbId, Timestamp};

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub student_number: String,
    pub name: String,
    pub email: Option<String>,
    pub major: Option<String>,
    pub year: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a student. `student_number` must already be normalized.
#[derive(Debug, Deserialize)]
pub struct CreateStudent {
    pub student_number: String,
    pub name: String,
    pub email: Option<String>,
    pub major: Option<String>,
    pub year: Option<String>,
}

/// Student directory entry with the number of events attended.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentSummary {
    pub id: DbId,
    pub student_number: String,
    pub name: String,
    pub email: Option<String>,
    pub major: Option<String>,
    pub year: Option<String>,
    pub attendance_count: i64,
    pub last_attended_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Query parameters for the student directory.
#[derive(Debug, Default, Deserialize)]
pub struct StudentListParams {
    /// Case-insensitive match against number, name, email or major.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
