//! Attendance and feedback reports.
//!
//! A report is built from flat entries loaded for either a single event or a
//! date range. The builders resolve labels, sort rows by timestamp and compute
//! the summary block; the scope only decides which optional columns appear.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::labels::{resolve_attendee_role, Classification, NOT_AVAILABLE_LABEL};
use crate::metrics::round_half_up;
use crate::types::{DbId, Timestamp};

/// Timestamp format used in rendered report cells.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Date format used in report headers and file names.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Kind and scope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Attendance,
    Feedback,
}

impl ReportKind {
    /// Parse the `type` query parameter. Missing means attendance.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None | Some("attendance") => Ok(ReportKind::Attendance),
            Some("feedback") => Ok(ReportKind::Feedback),
            Some(other) => Err(CoreError::Validation(format!(
                "Invalid report type '{other}'. Must be one of: attendance, feedback"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Attendance => "attendance",
            ReportKind::Feedback => "feedback",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Attendance => "Attendance Report",
            ReportKind::Feedback => "Feedback Report",
        }
    }
}

/// Header information for a single-event report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventHeader {
    pub id: DbId,
    pub title: String,
    pub date_time: Timestamp,
    pub event_type: String,
    pub location: String,
}

impl EventHeader {
    pub fn new(
        id: DbId,
        title: String,
        date_time: Timestamp,
        event_type: &Classification,
        location: &Classification,
    ) -> Self {
        Self {
            id,
            title,
            date_time,
            event_type: event_type.display_label().to_string(),
            location: location.display_label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportScope {
    Event(EventHeader),
    Range { start: Timestamp, end: Timestamp },
}

impl ReportScope {
    /// Rows carry event columns only when they may come from several events.
    pub fn is_range(&self) -> bool {
        matches!(self, ReportScope::Range { .. })
    }

    /// One-line description for the report header.
    pub fn describe(&self) -> String {
        match self {
            ReportScope::Event(header) => format!(
                "Event: {} ({})",
                header.title,
                header.date_time.format(DISPLAY_DATE_FORMAT)
            ),
            ReportScope::Range { start, end } => format!(
                "Date Range: {} - {}",
                start.format(DISPLAY_DATE_FORMAT),
                end.format(DISPLAY_DATE_FORMAT)
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Entries (repository output)
// ---------------------------------------------------------------------------

/// One check-in joined with its student and event.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceEntry {
    pub attendance_id: DbId,
    pub student_number: String,
    pub student_name: String,
    pub role: Option<String>,
    pub custom_role: Option<String>,
    pub signed_in_at: Timestamp,
    pub has_feedback: bool,
    pub event_title: String,
    pub event_type: Classification,
}

/// One feedback record joined with its student and event.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEntry {
    pub feedback_id: DbId,
    pub student_number: String,
    pub event_title: String,
    pub rating: Option<i32>,
    pub recommend_score: Option<i32>,
    pub heard_via: Classification,
    pub submitted_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Rows and summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRow {
    pub attendance_id: DbId,
    pub student_number: String,
    pub name: String,
    pub role: String,
    pub signed_in_at: Timestamp,
    pub feedback_submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

impl AttendanceRow {
    pub fn feedback_label(&self) -> &'static str {
        if self.feedback_submitted {
            "Submitted"
        } else {
            "Not Submitted"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRow {
    pub feedback_id: DbId,
    pub student_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    pub rating: Option<i32>,
    pub recommend_score: Option<i32>,
    pub heard_via: String,
    pub submitted_at: Timestamp,
}

impl FeedbackRow {
    pub fn rating_label(&self) -> String {
        score_label(self.rating)
    }

    pub fn recommend_label(&self) -> String {
        score_label(self.recommend_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub total_attendees: i64,
    pub feedback_count: i64,
    /// Whole-number percentage of attendees that left feedback.
    pub response_rate_percent: i64,
}

impl AttendanceSummary {
    pub fn response_rate_label(&self) -> String {
        format!("{}%", self.response_rate_percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSummary {
    pub total_submissions: i64,
    /// Mean over submissions that carry a rating, `None` when none do.
    pub average_rating: Option<f64>,
}

impl FeedbackSummary {
    /// The average to one decimal place, or `"N/A"`.
    pub fn average_rating_label(&self) -> String {
        match self.average_rating {
            Some(avg) => format!("{:.1}", round_half_up(avg * 10.0) as f64 / 10.0),
            None => NOT_AVAILABLE_LABEL.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceReport {
    pub scope: ReportScope,
    pub summary: AttendanceSummary,
    pub rows: Vec<AttendanceRow>,
}

impl AttendanceReport {
    /// Build the report, ordering rows by sign-in time regardless of input order.
    pub fn build(scope: ReportScope, mut entries: Vec<AttendanceEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.signed_in_at
                .cmp(&b.signed_in_at)
                .then(a.attendance_id.cmp(&b.attendance_id))
        });

        let with_event = scope.is_range();
        let total = entries.len() as i64;
        let with_feedback = entries.iter().filter(|e| e.has_feedback).count() as i64;
        let response_rate_percent = if total == 0 {
            0
        } else {
            round_half_up(with_feedback as f64 / total as f64 * 100.0)
        };

        let rows = entries
            .into_iter()
            .map(|e| AttendanceRow {
                attendance_id: e.attendance_id,
                role: resolve_attendee_role(e.role.as_deref(), e.custom_role.as_deref()),
                student_number: e.student_number,
                name: e.student_name,
                signed_in_at: e.signed_in_at,
                feedback_submitted: e.has_feedback,
                event_type: with_event.then(|| e.event_type.display_label().to_string()),
                event_title: with_event.then_some(e.event_title),
            })
            .collect();

        Self {
            scope,
            summary: AttendanceSummary {
                total_attendees: total,
                feedback_count: with_feedback,
                response_rate_percent,
            },
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    pub scope: ReportScope,
    pub summary: FeedbackSummary,
    pub rows: Vec<FeedbackRow>,
}

impl FeedbackReport {
    /// Build the report, ordering rows by submission time regardless of input order.
    pub fn build(scope: ReportScope, mut entries: Vec<FeedbackEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then(a.feedback_id.cmp(&b.feedback_id))
        });

        let ratings: Vec<f64> = entries
            .iter()
            .filter_map(|e| e.rating)
            .map(f64::from)
            .collect();
        let average_rating =
            (!ratings.is_empty()).then(|| ratings.iter().sum::<f64>() / ratings.len() as f64);

        let with_event = scope.is_range();
        let total = entries.len() as i64;
        let rows = entries
            .into_iter()
            .map(|e| FeedbackRow {
                feedback_id: e.feedback_id,
                heard_via: e.heard_via.display_label().to_string(),
                student_number: e.student_number,
                event_title: with_event.then_some(e.event_title),
                rating: e.rating,
                recommend_score: e.recommend_score,
                submitted_at: e.submitted_at,
            })
            .collect();

        Self {
            scope,
            summary: FeedbackSummary {
                total_submissions: total,
                average_rating,
            },
            rows,
        }
    }
}

/// Either report, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Report {
    Attendance(AttendanceReport),
    Feedback(FeedbackReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Attendance(_) => ReportKind::Attendance,
            Report::Feedback(_) => ReportKind::Feedback,
        }
    }
}

/// Suggested download name, e.g. `feedback_report_2025-03-14.pdf`.
pub fn report_filename(kind: ReportKind, date: NaiveDate) -> String {
    format!("{}_report_{}.pdf", kind.as_str(), date.format(DISPLAY_DATE_FORMAT))
}

fn score_label(score: Option<i32>) -> String {
    score.map_or_else(|| NOT_AVAILABLE_LABEL.to_string(), |s| s.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
