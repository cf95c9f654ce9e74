//! Handler for the staff analytics dashboard.

use axum::extract::{Query, State};
use axum::Json;
use insight_core::metrics::{summarize, DashboardSummary};
use insight_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::query::EventFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard?start_date=&end_date=&event_type=
///
/// Attendance and feedback metrics over the events matching the filters.
pub async fn get_dashboard(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<EventFilterParams>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let filter = params.to_filter()?;
    let events = DashboardRepo::load_snapshot(&state.pool, &filter).await?;
    let summary = summarize(&events);

    tracing::debug!(
        user_id = staff.user_id,
        total_events = summary.total_events,
        total_attendees = summary.total_attendees,
        "Dashboard computed",
    );

    Ok(Json(DataResponse { data: summary }))
}
