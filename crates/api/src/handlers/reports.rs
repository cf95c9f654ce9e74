//! Handlers for attendance and feedback reports: JSON data, the printable
//! HTML page, and PDF export.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use insight_core::error::CoreError;
use insight_core::filters::DateRange;
use insight_core::report::{
    report_filename, AttendanceReport, EventHeader, FeedbackReport, Report, ReportKind,
    ReportScope,
};
use insight_core::types::{DbId, Timestamp};
use insight_db::repositories::{EventRepo, ReportRepo};

use crate::auth::jwt::generate_report_token;
use crate::error::{AppError, AppResult};
use crate::export::PdfOptions;
use crate::middleware::auth::ReportViewer;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::report::render_report;

/// Path of the printable page, relative to the public base URL.
const PRINTABLE_PATH: &str = "/api/v1/reports/printable";

/// `?type=&event_id=&start_date=&end_date=` shared by every report endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// `attendance` (default) or `feedback`.
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub event_id: Option<DbId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/reports
pub async fn get_report(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<Report>>> {
    let report = load_report(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/printable
///
/// Printable HTML page. Opened by staff directly or by the PDF service with
/// a short-lived `token` query parameter.
pub async fn printable_report(
    ReportViewer(viewer): ReportViewer,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Html<String>> {
    let report = load_report(&state.pool, &params).await?;
    let html = render_report(&report, Utc::now())
        .map_err(|e| AppError::InternalError(format!("Report template error: {e}")))?;

    tracing::debug!(
        user_id = viewer.user_id,
        kind = report.kind().as_str(),
        "Printable report rendered",
    );

    Ok(Html(html))
}

/// GET /api/v1/admin/reports/pdf
///
/// Render the printable page through the export service and return it as a
/// PDF download.
pub async fn export_pdf(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    // Validates the parameters (and that the event exists) before any
    // export work starts.
    let report = load_report(&state.pool, &params).await?;
    let kind = report.kind();

    let token = generate_report_token(staff.user_id, &staff.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let url = printable_url(&state.config.public_base_url, kind, &params, &token)?;

    let pdf = state
        .exporter
        .export_pdf(url.as_str(), &PdfOptions::default())
        .await?;

    let filename = report_filename(kind, Utc::now().date_naive());
    tracing::info!(
        user_id = staff.user_id,
        kind = kind.as_str(),
        size = pdf.len(),
        "Report exported to PDF",
    );

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Which repository join path feeds the report.
#[derive(Clone, Copy)]
enum Source {
    Event(DbId),
    Range(Timestamp, Timestamp),
}

/// Resolve the report scope from the query and build the report.
///
/// An `event_id` selects a single event; otherwise both ends of a date range
/// are required.
pub async fn load_report(pool: &PgPool, params: &ReportParams) -> AppResult<Report> {
    let kind = ReportKind::parse(params.report_type.as_deref())?;

    let (scope, source) = match params.event_id {
        Some(id) => {
            let event = EventRepo::find_by_id(pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
            let header = EventHeader::new(
                event.id,
                event.title.clone(),
                event.date_time,
                &event.event_type(),
                &event.location(),
            );
            (ReportScope::Event(header), Source::Event(id))
        }
        None => {
            let range =
                DateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?;
            let (start, end) = range.closed().ok_or_else(|| {
                AppError::BadRequest(
                    "Either event_id or a date range (start_date and end_date) is required"
                        .into(),
                )
            })?;
            (ReportScope::Range { start, end }, Source::Range(start, end))
        }
    };

    let report = match kind {
        ReportKind::Attendance => {
            let entries = match source {
                Source::Event(id) => ReportRepo::attendance_for_event(pool, id).await?,
                Source::Range(start, end) => {
                    ReportRepo::attendance_in_range(pool, start, end).await?
                }
            };
            Report::Attendance(AttendanceReport::build(scope, entries))
        }
        ReportKind::Feedback => {
            let entries = match source {
                Source::Event(id) => ReportRepo::feedback_for_event(pool, id).await?,
                Source::Range(start, end) => ReportRepo::feedback_in_range(pool, start, end).await?,
            };
            Report::Feedback(FeedbackReport::build(scope, entries))
        }
    };

    Ok(report)
}

/// URL of the printable page for the same report, carrying a report token.
fn printable_url(
    base_url: &str,
    kind: ReportKind,
    params: &ReportParams,
    token: &str,
) -> AppResult<reqwest::Url> {
    let mut query: Vec<(&str, String)> = vec![("type", kind.as_str().to_string())];
    match params.event_id {
        Some(id) => query.push(("event_id", id.to_string())),
        None => {
            if let Some(start) = &params.start_date {
                query.push(("start_date", start.clone()));
            }
            if let Some(end) = &params.end_date {
                query.push(("end_date", end.clone()));
            }
        }
    }
    query.push(("token", token.to_string()));

    reqwest::Url::parse_with_params(&format!("{base_url}{PRINTABLE_PATH}"), &query)
        .map_err(|e| AppError::InternalError(format!("Invalid printable report URL: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_url_carries_scope_and_token() {
        let params = ReportParams {
            report_type: None,
            event_id: None,
            start_date: Some("2025-01-01".into()),
            end_date: Some("2025-01-31".into()),
        };
        let url =
            printable_url("http://api.local:3000", ReportKind::Feedback, &params, "abc").unwrap();

        assert_eq!(url.path(), "/api/v1/reports/printable");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("type".to_string(), "feedback".to_string()),
                ("start_date".to_string(), "2025-01-01".to_string()),
                ("end_date".to_string(), "2025-01-31".to_string()),
                ("token".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn event_scope_ignores_dates_in_printable_url() {
        let params = ReportParams {
            report_type: Some("attendance".into()),
            event_id: Some(9),
            start_date: Some("2025-01-01".into()),
            end_date: None,
        };
        let url =
            printable_url("http://api.local", ReportKind::Attendance, &params, "t").unwrap();
        assert_eq!(
            url.query(),
            Some("type=attendance&event_id=9&token=t")
        );
    }
}
