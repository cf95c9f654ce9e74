pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod events;
pub mod feedback;
pub mod field_options;
pub mod health;
pub mod reports;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      staff login (public)
/// /auth/student-login                              student login (public)
/// /auth/me                                         current principal (auth)
///
/// /events/active                                   event open for check-in (public)
/// /field-options/{field_name}                      active options (public)
/// /feedback                                        submit feedback (public)
/// /attendance/checkin                              check in (auth)
/// /reports/printable                               printable report (staff or report token)
///
/// /admin/dashboard                                 metrics (staff)
/// /admin/events                                    list, create (staff)
/// /admin/events/{id}                               get, update (staff)
/// /admin/field-options                             list, create (staff)
/// /admin/field-options/reorder                     reorder (staff)
/// /admin/field-options/{id}                        update, delete (staff)
/// /admin/students                                  directory (staff)
/// /admin/reports                                   report data (staff)
/// /admin/reports/pdf                               PDF download (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public and authenticated (any role).
        .nest("/auth", auth::router())
        .nest("/events", events::router())
        .nest("/field-options", field_options::router())
        .nest("/feedback", feedback::router())
        .nest("/attendance", attendance::router())
        .nest("/reports", reports::router())
        // Staff only.
        .nest("/admin/dashboard", dashboard::router())
        .nest("/admin/events", events::admin_router())
        .nest("/admin/field-options", field_options::admin_router())
        .nest("/admin/students", students::router())
        .nest("/admin/reports", reports::admin_router())
}
