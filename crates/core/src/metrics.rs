//! Dashboard metrics over an event/attendance/feedback snapshot.
//!
//! Every function here is pure: the caller loads an already-filtered snapshot
//! (date range, event type) and passes it in. Divisions with a zero
//! denominator yield 0 so an empty dashboard still renders.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::labels::Classification;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Recommend scores at or above this value count as promoters.
pub const PROMOTER_MIN_SCORE: i32 = 9;

/// Recommend scores at or below this value count as detractors.
pub const DETRACTOR_MAX_SCORE: i32 = 6;

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// An event with its attendances, as loaded for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSnapshot {
    pub id: DbId,
    pub title: String,
    pub event_type: Classification,
    pub date_time: Timestamp,
    pub attendances: Vec<AttendanceSnapshot>,
}

/// One check-in, with the feedback attached to it if any.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSnapshot {
    pub id: DbId,
    pub signed_in_at: Timestamp,
    pub feedback: Option<FeedbackSnapshot>,
}

/// The numeric parts of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackSnapshot {
    pub rating: Option<i32>,
    pub recommend_score: Option<i32>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Dashboard payload. Field names follow the dashboard's published JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_events: i64,
    pub total_attendees: i64,
    pub attendance_by_type: BTreeMap<String, i64>,
    pub feedback_metrics: FeedbackMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackMetrics {
    pub count: i64,
    pub response_rate: f64,
    pub average_rating: f64,
    pub nps_score: i64,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

pub fn total_events(events: &[EventSnapshot]) -> i64 {
    events.len() as i64
}

pub fn total_attendees(events: &[EventSnapshot]) -> i64 {
    events.iter().map(|e| e.attendances.len() as i64).sum()
}

/// Attendance counts keyed by resolved event-type label.
///
/// Events without a type bucket under `"Unknown"`. Events that resolve to the
/// same label are merged.
pub fn attendance_by_type(events: &[EventSnapshot]) -> BTreeMap<String, i64> {
    let mut buckets = BTreeMap::new();
    for event in events {
        *buckets
            .entry(event.event_type.bucket_label().to_string())
            .or_insert(0) += event.attendances.len() as i64;
    }
    buckets
}

/// Number of attendances that carry a feedback record.
pub fn feedback_count(events: &[EventSnapshot]) -> i64 {
    events
        .iter()
        .flat_map(|e| &e.attendances)
        .filter(|a| a.feedback.is_some())
        .count() as i64
}

/// Share of attendees that left feedback, in `[0, 1]`.
pub fn feedback_response_rate(events: &[EventSnapshot]) -> f64 {
    let attendees = total_attendees(events);
    if attendees == 0 {
        return 0.0;
    }
    feedback_count(events) as f64 / attendees as f64
}

/// Average of per-event mean ratings, divided by the total event count.
///
/// Each event with at least one rating contributes its own mean; events with
/// none add nothing to the numerator but still count in the denominator. This
/// weights every event equally regardless of its attendee count.
pub fn average_rating(events: &[EventSnapshot]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let sum_of_means: f64 = events.iter().filter_map(event_mean_rating).sum();
    sum_of_means / events.len() as f64
}

/// Mean rating for a single event, `None` when nobody rated it.
pub fn event_mean_rating(event: &EventSnapshot) -> Option<f64> {
    let ratings: Vec<i32> = event
        .attendances
        .iter()
        .filter_map(|a| a.feedback.and_then(|f| f.rating))
        .filter(|r| *r != 0)
        .collect();
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64)
}

/// Net Promoter Score over every recommend score in the snapshot.
///
/// Passive scores (7-8) stay in the denominator. Returns 0 when nobody
/// answered.
pub fn net_promoter_score(events: &[EventSnapshot]) -> i64 {
    let scores: Vec<i32> = events
        .iter()
        .flat_map(|e| &e.attendances)
        .filter_map(|a| a.feedback.and_then(|f| f.recommend_score))
        .collect();
    nps_from_scores(&scores)
}

/// NPS for a flat list of recommend scores.
pub fn nps_from_scores(scores: &[i32]) -> i64 {
    if scores.is_empty() {
        return 0;
    }
    let n = scores.len() as f64;
    let promoters = scores.iter().filter(|s| **s >= PROMOTER_MIN_SCORE).count() as f64;
    let detractors = scores.iter().filter(|s| **s <= DETRACTOR_MAX_SCORE).count() as f64;
    round_half_up((promoters / n - detractors / n) * 100.0)
}

/// Compute the whole dashboard payload in one call.
pub fn summarize(events: &[EventSnapshot]) -> DashboardSummary {
    DashboardSummary {
        total_events: total_events(events),
        total_attendees: total_attendees(events),
        attendance_by_type: attendance_by_type(events),
        feedback_metrics: FeedbackMetrics {
            count: feedback_count(events),
            response_rate: feedback_response_rate(events),
            average_rating: average_rating(events),
            nps_score: net_promoter_score(events),
        },
    }
}

/// Round to the nearest integer, halves toward positive infinity.
///
/// `-12.5` becomes `-12` and `12.5` becomes `13`, matching how dashboard
/// figures have always been rounded.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
