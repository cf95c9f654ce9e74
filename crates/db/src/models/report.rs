//! Joined rows backing the attendance and feedback reports.

use sqlx::FromRow;
use insight_core::labels::Classification;
use insight_core::report::{AttendanceEntry, FeedbackEntry};
use insight_core::types::{DbId, Timestamp};

/// An attendance joined with its student, event and feedback presence.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceReportRow {
    pub attendance_id: DbId,
    pub student_number: String,
    pub student_name: String,
    pub role: Option<String>,
    pub custom_role: Option<String>,
    pub signed_in_at: Timestamp,
    pub has_feedback: bool,
    pub event_title: String,
    pub type_option_id: Option<DbId>,
    pub type_option_value: Option<String>,
    pub custom_type: Option<String>,
}

impl From<AttendanceReportRow> for AttendanceEntry {
    fn from(row: AttendanceReportRow) -> Self {
        AttendanceEntry {
            event_type: Classification::from_parts(
                row.type_option_id,
                row.type_option_value.as_deref(),
                row.custom_type.as_deref(),
            ),
            attendance_id: row.attendance_id,
            student_number: row.student_number,
            student_name: row.student_name,
            role: row.role,
            custom_role: row.custom_role,
            signed_in_at: row.signed_in_at,
            has_feedback: row.has_feedback,
            event_title: row.event_title,
        }
    }
}

/// A feedback record joined with its student, event and heard-via option.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackReportRow {
    pub feedback_id: DbId,
    pub student_number: String,
    pub event_title: String,
    pub rating: Option<i32>,
    pub recommend_score: Option<i32>,
    pub heard_via_option_id: Option<DbId>,
    pub heard_via_option_value: Option<String>,
    pub custom_heard_via: Option<String>,
    pub submitted_at: Timestamp,
}

impl From<FeedbackReportRow> for FeedbackEntry {
    fn from(row: FeedbackReportRow) -> Self {
        FeedbackEntry {
            heard_via: Classification::from_parts(
                row.heard_via_option_id,
                row.heard_via_option_value.as_deref(),
                row.custom_heard_via.as_deref(),
            ),
            feedback_id: row.feedback_id,
            student_number: row.student_number,
            event_title: row.event_title,
            rating: row.rating,
            recommend_score: row.recommend_score,
            submitted_at: row.submitted_at,
        }
    }
}
