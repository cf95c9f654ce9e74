use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/admin/students`.
///
/// ```text
/// GET /                  -> list_students
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(students::list_students))
}
