//! Handler for post-event feedback submission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use insight_core::error::CoreError;
use insight_core::feedback::{normalize_open_ended, validate_rating, validate_recommend_score};
use insight_core::field_options::FIELD_HEARD_VIA;
use insight_core::types::DbId;
use insight_db::models::feedback::CreateFeedback;
use insight_db::repositories::{AttendanceRepo, FeedbackRepo};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::handlers::events::resolve_choice;
use crate::handlers::validate_body;
use crate::response::DataResponse;
use crate::state::AppState;

const DUPLICATE_FEEDBACK: &str = "Feedback already submitted for this attendance";

/// Request body for `POST /feedback`.
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    pub attendance_id: Option<DbId>,
    pub rating: Option<i32>,
    pub recommend_score: Option<i32>,
    pub heard_via_option_id: Option<DbId>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub custom_heard_via: Option<String>,
    /// Free-form answers keyed by question.
    pub open_ended: Option<serde_json::Value>,
}

/// POST /api/v1/feedback
///
/// Submit feedback for a check-in. Each attendance accepts one submission;
/// a second one answers 409.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(input): Json<FeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&input)?;
    let attendance_id = input
        .attendance_id
        .ok_or_else(|| AppError::BadRequest("Attendance ID is required".into()))?;
    validate_rating(input.rating)?;
    validate_recommend_score(input.recommend_score)?;
    let open_ended = normalize_open_ended(input.open_ended)?;

    AttendanceRepo::find_by_id(&state.pool, attendance_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attendance record",
            id: attendance_id,
        }))?;

    if let Some(existing) = FeedbackRepo::find_by_attendance(&state.pool, attendance_id).await? {
        return Err(duplicate(existing.id));
    }

    let (heard_via_option_id, custom_heard_via) = resolve_choice(
        &state.pool,
        FIELD_HEARD_VIA,
        input.heard_via_option_id,
        input.custom_heard_via.as_deref(),
    )
    .await?;

    let create = CreateFeedback {
        attendance_id,
        rating: input.rating,
        recommend_score: input.recommend_score,
        heard_via_option_id,
        custom_heard_via,
        open_ended,
    };
    let feedback = match FeedbackRepo::create(&state.pool, &create).await {
        Ok(feedback) => feedback,
        Err(err) if is_unique_violation(&err, "uq_feedback_attendance") => {
            let existing = FeedbackRepo::find_by_attendance(&state.pool, attendance_id)
                .await?
                .ok_or(AppError::Database(err))?;
            return Err(duplicate(existing.id));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(feedback_id = feedback.id, attendance_id, "Feedback submitted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

fn duplicate(existing_id: DbId) -> AppError {
    AppError::Core(CoreError::AlreadyExists {
        entity: "feedback",
        existing_id,
        message: DUPLICATE_FEEDBACK.into(),
    })
}
