//! Row sources for attendance and feedback reports.
//!
//! Reports are scoped either to one event or to events scheduled within an
//! inclusive date range. Rows come back in timestamp order, although the
//! report builders sort again on their own.

use sqlx::PgPool;
use insight_core::report::{AttendanceEntry, FeedbackEntry};
use insight_core::types::{DbId, Timestamp};

use crate::models::report::{AttendanceReportRow, FeedbackReportRow};

const SELECT_ATTENDANCE: &str = "\
    SELECT a.id AS attendance_id, st.student_number, st.name AS student_name, \
           a.role, a.custom_role, a.signed_in_at, \
           (f.id IS NOT NULL) AS has_feedback, \
           e.title AS event_title, e.type_option_id, t.value AS type_option_value, e.custom_type \
    FROM attendances a \
    JOIN students st ON st.id = a.student_id \
    JOIN events e ON e.id = a.event_id \
    LEFT JOIN feedback f ON f.attendance_id = a.id \
    LEFT JOIN field_options t ON t.id = e.type_option_id";

const SELECT_FEEDBACK: &str = "\
    SELECT f.id AS feedback_id, st.student_number, e.title AS event_title, \
           f.rating, f.recommend_score, \
           f.heard_via_option_id, h.value AS heard_via_option_value, f.custom_heard_via, \
           f.submitted_at \
    FROM feedback f \
    JOIN attendances a ON a.id = f.attendance_id \
    JOIN students st ON st.id = a.student_id \
    JOIN events e ON e.id = a.event_id \
    LEFT JOIN field_options h ON h.id = f.heard_via_option_id";

/// Provides the joined rows for report generation.
pub struct ReportRepo;

impl ReportRepo {
    // -----------------------------------------------------------------------
    // Attendance
    // -----------------------------------------------------------------------

    pub async fn attendance_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<AttendanceEntry>, sqlx::Error> {
        let query = format!(
            "{SELECT_ATTENDANCE} WHERE a.event_id = $1 ORDER BY a.signed_in_at, a.id"
        );
        let rows = sqlx::query_as::<_, AttendanceReportRow>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(AttendanceEntry::from).collect())
    }

    pub async fn attendance_in_range(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<AttendanceEntry>, sqlx::Error> {
        let query = format!(
            "{SELECT_ATTENDANCE} \
             WHERE e.date_time BETWEEN $1 AND $2 \
             ORDER BY a.signed_in_at, a.id"
        );
        let rows = sqlx::query_as::<_, AttendanceReportRow>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(AttendanceEntry::from).collect())
    }

    // -----------------------------------------------------------------------
    // Feedback
    // -----------------------------------------------------------------------

    pub async fn feedback_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<FeedbackEntry>, sqlx::Error> {
        let query = format!(
            "{SELECT_FEEDBACK} WHERE a.event_id = $1 ORDER BY f.submitted_at, f.id"
        );
        let rows = sqlx::query_as::<_, FeedbackReportRow>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(FeedbackEntry::from).collect())
    }

    pub async fn feedback_in_range(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<FeedbackEntry>, sqlx::Error> {
        let query = format!(
            "{SELECT_FEEDBACK} \
             WHERE e.date_time BETWEEN $1 AND $2 \
             ORDER BY f.submitted_at, f.id"
        );
        let rows = sqlx::query_as::<_, FeedbackReportRow>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(FeedbackEntry::from).collect())
    }
}
