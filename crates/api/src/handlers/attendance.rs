//! Handler for event check-in.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use insight_core::checkin::normalize_attendee_role;
use insight_core::error::CoreError;
use insight_core::types::DbId;
use insight_db::models::attendance::{Attendance, CreateAttendance};
use insight_db::models::event::Event;
use insight_db::models::student::Student;
use insight_db::repositories::{AttendanceRepo, EventRepo, StudentRepo};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::email::FeedbackMailer;
use crate::response::DataResponse;
use crate::state::AppState;

const DUPLICATE_CHECK_IN: &str = "Student already checked in to this event";

/// Request body for `POST /attendance/checkin`.
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    /// Defaults to the signed-in student. Staff must name the student.
    pub student_id: Option<DbId>,
    pub event_id: Option<DbId>,
    pub role: Option<String>,
    pub custom_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    #[serde(flatten)]
    pub attendance: Attendance,
    /// Where the student can leave feedback for this check-in.
    pub feedback_url: String,
}

/// POST /api/v1/attendance/checkin
///
/// Record that a student attended an event. A repeated check-in answers 409
/// with the existing `attendance_id`.
pub async fn check_in(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CheckInRequest>,
) -> AppResult<impl IntoResponse> {
    let student_id = match (auth.is_student(), input.student_id) {
        (true, Some(id)) if id != auth.user_id => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Students may only check themselves in".into(),
            )));
        }
        (true, _) => Some(auth.user_id),
        (false, id) => id,
    };
    let (Some(student_id), Some(event_id)) = (student_id, input.event_id) else {
        return Err(AppError::BadRequest(
            "Student ID and Event ID are required".into(),
        ));
    };
    let (role, custom_role) =
        normalize_attendee_role(input.role.as_deref(), input.custom_role.as_deref())?;

    let student = StudentRepo::find_by_id(&state.pool, student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: student_id,
        }))?;
    let event = EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;

    if let Some(existing) =
        AttendanceRepo::find_by_student_and_event(&state.pool, student_id, event_id).await?
    {
        return Err(duplicate(existing.id));
    }

    let create = CreateAttendance {
        student_id,
        event_id,
        role,
        custom_role,
    };
    let attendance = match AttendanceRepo::create(&state.pool, &create).await {
        Ok(attendance) => attendance,
        // A concurrent check-in won the race; report the row it created.
        Err(err) if is_unique_violation(&err, "uq_attendances_student_event") => {
            let existing =
                AttendanceRepo::find_by_student_and_event(&state.pool, student_id, event_id)
                    .await?
                    .ok_or(AppError::Database(err))?;
            return Err(duplicate(existing.id));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        attendance_id = attendance.id,
        student_id,
        event_id,
        user_id = auth.user_id,
        "Student checked in",
    );

    let feedback_url = feedback_url(&state.config.app_base_url, attendance.id);
    if let Some(mailer) = &state.mailer {
        spawn_feedback_request(Arc::clone(mailer), &student, &event, feedback_url.clone());
    }

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CheckInResponse {
                attendance,
                feedback_url,
            },
        }),
    ))
}

/// Link to the feedback form for one attendance.
pub fn feedback_url(app_base_url: &str, attendance_id: DbId) -> String {
    format!("{app_base_url}/feedback?attendanceId={attendance_id}")
}

fn duplicate(existing_id: DbId) -> AppError {
    AppError::Core(CoreError::AlreadyExists {
        entity: "attendance",
        existing_id,
        message: DUPLICATE_CHECK_IN.into(),
    })
}

/// Send the feedback request in the background. Failures are logged and
/// never affect the check-in response.
fn spawn_feedback_request(
    mailer: Arc<FeedbackMailer>,
    student: &Student,
    event: &Event,
    feedback_url: String,
) {
    let Some(to) = student.email.clone() else {
        return;
    };
    let student_name = student.name.clone();
    let event_title = event.title.clone();
    let student_id = student.id;

    tokio::spawn(async move {
        if let Err(e) = mailer
            .send_feedback_request(&to, &student_name, &event_title, &feedback_url)
            .await
        {
            tracing::warn!(student_id, error = %e, "Failed to send feedback request email");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_url_points_at_attendance() {
        assert_eq!(
            feedback_url("http://localhost:5173", 42),
            "http://localhost:5173/feedback?attendanceId=42"
        );
    }
}
