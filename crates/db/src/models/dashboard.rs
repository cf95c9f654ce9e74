//! Flat rows loaded for the dashboard and their folding into snapshots.

use sqlx::FromRow;
use insight_core::labels::Classification;
use insight_core::metrics::{AttendanceSnapshot, EventSnapshot, FeedbackSnapshot};
use insight_core::types::{DbId, Timestamp};

/// One `events LEFT JOIN attendances LEFT JOIN feedback` row.
///
/// Events without attendances produce a single row with the attendance
/// columns null; attendances without feedback have the feedback columns null.
#[derive(Debug, Clone, FromRow)]
pub struct DashboardRow {
    pub event_id: DbId,
    pub title: String,
    pub date_time: Timestamp,
    pub type_option_id: Option<DbId>,
    pub type_option_value: Option<String>,
    pub custom_type: Option<String>,
    pub attendance_id: Option<DbId>,
    pub signed_in_at: Option<Timestamp>,
    pub feedback_id: Option<DbId>,
    pub rating: Option<i32>,
    pub recommend_score: Option<i32>,
}

/// Fold joined rows into one snapshot per event.
///
/// Rows must be grouped by event (the query orders by event id). Events keep
/// the order in which they first appear.
pub fn fold_snapshots(rows: Vec<DashboardRow>) -> Vec<EventSnapshot> {
    let mut events: Vec<EventSnapshot> = Vec::new();

    for row in rows {
        let starts_new_event = events.last().map_or(true, |e| e.id != row.event_id);
        if starts_new_event {
            events.push(EventSnapshot {
                id: row.event_id,
                title: row.title.clone(),
                event_type: Classification::from_parts(
                    row.type_option_id,
                    row.type_option_value.as_deref(),
                    row.custom_type.as_deref(),
                ),
                date_time: row.date_time,
                attendances: Vec::new(),
            });
        }

        let (Some(attendance_id), Some(signed_in_at)) = (row.attendance_id, row.signed_in_at) else {
            continue;
        };
        let feedback = row.feedback_id.map(|_| FeedbackSnapshot {
            rating: row.rating,
            recommend_score: row.recommend_score,
        });
        if let Some(event) = events.last_mut() {
            event.attendances.push(AttendanceSnapshot {
                id: attendance_id,
                signed_in_at,
                feedback,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(event_id: DbId, attendance_id: Option<DbId>, feedback: Option<(i32, i32)>) -> DashboardRow {
        let at = Utc.with_ymd_and_hms(2025, 4, 2, 15, 0, 0).unwrap();
        DashboardRow {
            event_id,
            title: format!("Event {event_id}"),
            date_time: at,
            type_option_id: None,
            type_option_value: None,
            custom_type: None,
            attendance_id,
            signed_in_at: attendance_id.map(|_| at),
            feedback_id: feedback.map(|_| attendance_id.unwrap_or_default() * 10),
            rating: feedback.map(|f| f.0),
            recommend_score: feedback.map(|f| f.1),
        }
    }

    #[test]
    fn event_without_attendances_has_empty_list() {
        let events = fold_snapshots(vec![row(1, None, None)]);
        assert_eq!(events.len(), 1);
        assert!(events[0].attendances.is_empty());
        assert!(events[0].event_type.is_unset());
    }

    #[test]
    fn rows_group_by_event() {
        let events = fold_snapshots(vec![
            row(1, Some(1), Some((4, 9))),
            row(1, Some(2), None),
            row(2, Some(3), Some((5, 10))),
        ]);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].attendances.len(), 2);
        assert_eq!(
            events[0].attendances[0].feedback,
            Some(FeedbackSnapshot {
                rating: Some(4),
                recommend_score: Some(9)
            })
        );
        assert_eq!(events[0].attendances[1].feedback, None);
        assert_eq!(events[1].attendances.len(), 1);
    }

    #[test]
    fn feedback_without_scores_still_counts() {
        let mut r = row(1, Some(1), None);
        r.feedback_id = Some(7);
        let events = fold_snapshots(vec![r]);
        assert_eq!(
            events[0].attendances[0].feedback,
            Some(FeedbackSnapshot {
                rating: None,
                recommend_score: None
            })
        );
    }
}
