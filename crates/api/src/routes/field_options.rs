use axum::routing::{get, put};
use axum::Router;

use crate::handlers::field_options;
use crate::state::AppState;

/// Public routes mounted at `/field-options`.
///
/// ```text
/// GET /{field_name}      -> list_active_options
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{field_name}", get(field_options::list_active_options))
}

/// Staff routes mounted at `/admin/field-options`.
///
/// ```text
/// GET    /               -> list_options
/// POST   /               -> create_option
/// PUT    /reorder        -> reorder_options
/// PUT    /{id}           -> update_option
/// DELETE /{id}           -> delete_option
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(field_options::list_options).post(field_options::create_option),
        )
        .route("/reorder", put(field_options::reorder_options))
        .route(
            "/{id}",
            put(field_options::update_option).delete(field_options::delete_option),
        )
}
