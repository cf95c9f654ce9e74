//! Loads the event/attendance/feedback snapshot behind the admin dashboard.

use sqlx::PgPool;
use insight_core::filters::EventFilter;
use insight_core::metrics::EventSnapshot;

use crate::models::dashboard::{fold_snapshots, DashboardRow};

/// Provides the dashboard snapshot query.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Every event matching `filter`, each with its attendances and their
    /// feedback, in one round trip.
    pub async fn load_snapshot(
        pool: &PgPool,
        filter: &EventFilter,
    ) -> Result<Vec<EventSnapshot>, sqlx::Error> {
        let rows = sqlx::query_as::<_, DashboardRow>(
            "SELECT e.id AS event_id, e.title, e.date_time, \
                    e.type_option_id, t.value AS type_option_value, e.custom_type, \
                    a.id AS attendance_id, a.signed_in_at, \
                    f.id AS feedback_id, f.rating, f.recommend_score \
             FROM events e \
             LEFT JOIN field_options t ON t.id = e.type_option_id \
             LEFT JOIN attendances a ON a.event_id = e.id \
             LEFT JOIN feedback f ON f.attendance_id = a.id \
             WHERE ($1::TIMESTAMPTZ IS NULL OR e.date_time >= $1) \
               AND ($2::TIMESTAMPTZ IS NULL OR e.date_time <= $2) \
               AND ($3::BIGINT IS NULL OR e.type_option_id = $3) \
             ORDER BY e.date_time, e.id, a.signed_in_at, a.id",
        )
        .bind(filter.range.start)
        .bind(filter.range.end)
        .bind(filter.type_option_id)
        .fetch_all(pool)
        .await?;

        tracing::debug!(rows = rows.len(), "Loaded dashboard snapshot rows");
        Ok(fold_snapshots(rows))
    }
}
