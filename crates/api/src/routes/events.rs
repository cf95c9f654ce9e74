use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Public routes mounted at `/events`.
///
/// ```text
/// GET /active            -> get_active_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/active", get(events::get_active_event))
}

/// Staff routes mounted at `/admin/events`.
///
/// ```text
/// GET  /                 -> list_events
/// POST /                 -> create_event
/// GET  /{id}             -> get_event
/// PUT  /{id}             -> update_event
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route("/{id}", get(events::get_event).put(events::update_event))
}
