//! Repository for the `attendances` table.

use sqlx::PgPool;
use insight_core::types::DbId;

use crate::models::attendance::{Attendance, CreateAttendance};

const COLUMNS: &str = "id, student_id, event_id, signed_in_at, role, custom_role, \
                       created_at, updated_at";

/// Provides check-in recording and lookup.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Record a check-in. Fails with `uq_attendances_student_event` if the
    /// student already checked in to the event.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttendance,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendances (student_id, event_id, role, custom_role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.student_id)
            .bind(input.event_id)
            .bind(&input.role)
            .bind(&input.custom_role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendances WHERE id = $1");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The existing check-in for a (student, event) pair, if any.
    pub async fn find_by_student_and_event(
        pool: &PgPool,
        student_id: DbId,
        event_id: DbId,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendances WHERE student_id = $1 AND event_id = $2"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Number of check-ins recorded for an event.
    pub async fn count_for_event(pool: &PgPool, event_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM attendances WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(pool)
            .await
    }
}
