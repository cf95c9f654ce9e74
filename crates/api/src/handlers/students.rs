//! Handler for the staff student directory.

use axum::extract::{Query, State};
use axum::Json;
use insight_db::models::student::{StudentListParams, StudentSummary};
use insight_db::repositories::StudentRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/students?search=&limit=&offset=
///
/// Students with their attendance counts, ordered by student number.
pub async fn list_students(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<Json<DataResponse<Vec<StudentSummary>>>> {
    let students = StudentRepo::list_with_attendance(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: students }))
}
