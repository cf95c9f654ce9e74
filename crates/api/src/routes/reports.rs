use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`. Authenticated by [`ReportViewer`], which also
/// accepts a report token in the query string.
///
/// ```text
/// GET /printable         -> printable_report
/// ```
///
/// [`ReportViewer`]: crate::middleware::auth::ReportViewer
pub fn router() -> Router<AppState> {
    Router::new().route("/printable", get(reports::printable_report))
}

/// Staff routes mounted at `/admin/reports`.
///
/// ```text
/// GET /                  -> get_report
/// GET /pdf               -> export_pdf
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::get_report))
        .route("/pdf", get(reports::export_pdf))
}
