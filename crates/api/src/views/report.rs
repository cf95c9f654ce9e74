//! Printable report page.
//!
//! Turns a built [`Report`] into string-only view models and renders them with
//! askama. The same page is opened in a browser for printing and loaded by the
//! PDF service for export.

use askama::Template;
use insight_core::report::{
    AttendanceReport, FeedbackReport, Report, ReportKind, ReportScope, DISPLAY_TIME_FORMAT,
};
use insight_core::types::Timestamp;

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

pub struct HeaderView {
    pub report_title: &'static str,
    pub scope_line: String,
    /// Type and location line, single-event reports only.
    pub event_details: Option<String>,
    pub generated_at: String,
}

pub struct AttendanceRowView {
    pub student_number: String,
    pub name: String,
    pub role: String,
    pub event_title: String,
    pub event_type: String,
    pub signed_in_at: String,
    pub feedback: &'static str,
}

pub struct FeedbackRowView {
    pub student_number: String,
    pub event_title: String,
    pub rating: String,
    pub recommend_score: String,
    pub heard_via: String,
    pub submitted_at: String,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "reports/attendance.html")]
pub struct AttendancePage {
    pub header: HeaderView,
    pub total_attendees: i64,
    pub response_rate: String,
    pub show_event_columns: bool,
    pub rows: Vec<AttendanceRowView>,
}

#[derive(Template)]
#[template(path = "reports/feedback.html")]
pub struct FeedbackPage {
    pub header: HeaderView,
    pub total_submissions: i64,
    pub average_rating: String,
    pub show_event_columns: bool,
    pub rows: Vec<FeedbackRowView>,
}

impl AttendancePage {
    pub fn new(report: &AttendanceReport, generated_at: Timestamp) -> Self {
        let show_event_columns = report.scope.is_range();
        Self {
            header: header(ReportKind::Attendance, &report.scope, generated_at),
            total_attendees: report.summary.total_attendees,
            response_rate: report.summary.response_rate_label(),
            show_event_columns,
            rows: report
                .rows
                .iter()
                .map(|row| AttendanceRowView {
                    student_number: row.student_number.clone(),
                    name: row.name.clone(),
                    role: row.role.clone(),
                    event_title: row.event_title.clone().unwrap_or_default(),
                    event_type: row.event_type.clone().unwrap_or_default(),
                    signed_in_at: row.signed_in_at.format(DISPLAY_TIME_FORMAT).to_string(),
                    feedback: row.feedback_label(),
                })
                .collect(),
        }
    }
}

impl FeedbackPage {
    pub fn new(report: &FeedbackReport, generated_at: Timestamp) -> Self {
        let show_event_columns = report.scope.is_range();
        Self {
            header: header(ReportKind::Feedback, &report.scope, generated_at),
            total_submissions: report.summary.total_submissions,
            average_rating: report.summary.average_rating_label(),
            show_event_columns,
            rows: report
                .rows
                .iter()
                .map(|row| FeedbackRowView {
                    student_number: row.student_number.clone(),
                    event_title: row.event_title.clone().unwrap_or_default(),
                    rating: row.rating_label(),
                    recommend_score: row.recommend_label(),
                    heard_via: row.heard_via.clone(),
                    submitted_at: row.submitted_at.format(DISPLAY_TIME_FORMAT).to_string(),
                })
                .collect(),
        }
    }
}

fn header(kind: ReportKind, scope: &ReportScope, generated_at: Timestamp) -> HeaderView {
    let event_details = match scope {
        ReportScope::Event(event) => Some(format!(
            "Type: {} | Location: {}",
            event.event_type, event.location
        )),
        ReportScope::Range { .. } => None,
    };
    HeaderView {
        report_title: kind.title(),
        scope_line: scope.describe(),
        event_details,
        generated_at: generated_at.format(DISPLAY_TIME_FORMAT).to_string(),
    }
}

/// Render the printable HTML page for `report`.
pub fn render_report(report: &Report, generated_at: Timestamp) -> Result<String, askama::Error> {
    match report {
        Report::Attendance(r) => AttendancePage::new(r, generated_at).render(),
        Report::Feedback(r) => FeedbackPage::new(r, generated_at).render(),
    }
}
