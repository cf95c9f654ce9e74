//! Repository for the `students` table.

use sqlx::PgPool;
use insight_core::types::DbId;

use crate::models::student::{CreateStudent, Student, StudentListParams, StudentSummary};

const COLUMNS: &str = "id, student_number, name, email, major, year, created_at, updated_at";

/// Default page size for the student directory.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for the student directory.
const MAX_LIMIT: i64 = 500;

/// Provides registration and lookup for students.
pub struct StudentRepo;

impl StudentRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by normalized student number.
    pub async fn find_by_number(
        pool: &PgPool,
        student_number: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_number = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(student_number)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (student_number, name, email, major, year)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.student_number)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.major)
            .bind(&input.year)
            .fetch_one(pool)
            .await
    }

    /// Return the student with this number, registering it first if unknown.
    ///
    /// Uses `ON CONFLICT` so concurrent first logins resolve to the same row.
    pub async fn find_or_create(
        pool: &PgPool,
        student_number: &str,
        default_name: &str,
    ) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (student_number, name)
             VALUES ($1, $2)
             ON CONFLICT (student_number) DO UPDATE SET student_number = EXCLUDED.student_number
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(student_number)
            .bind(default_name)
            .fetch_one(pool)
            .await
    }

    /// Student directory with attendance counts, optionally filtered by a
    /// case-insensitive search term.
    pub async fn list_with_attendance(
        pool: &PgPool,
        params: &StudentListParams,
    ) -> Result<Vec<StudentSummary>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);
        let pattern = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        sqlx::query_as::<_, StudentSummary>(
            "SELECT s.id, s.student_number, s.name, s.email, s.major, s.year, \
                    COUNT(a.id) AS attendance_count, \
                    MAX(a.signed_in_at) AS last_attended_at, \
                    s.created_at \
             FROM students s \
             LEFT JOIN attendances a ON a.student_id = s.id \
             WHERE ($1::TEXT IS NULL \
                    OR s.student_number ILIKE $1 \
                    OR s.name ILIKE $1 \
                    OR s.email ILIKE $1 \
                    OR s.major ILIKE $1) \
             GROUP BY s.id \
             ORDER BY s.student_number \
             LIMIT $2 OFFSET $3",
        )
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
