use axum::routing::post;
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// POST /checkin          -> check_in
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/checkin", post(attendance::check_in))
}
