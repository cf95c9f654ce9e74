//! Repository for the `events` table.

use sqlx::PgPool;
use insight_core::filters::EventFilter;
use insight_core::types::{DbId, Timestamp};

use crate::models::event::{CreateEvent, Event};

/// Event columns joined with the display value of each referenced option.
const SELECT_EVENT: &str = "\
    SELECT e.id, e.title, e.description, \
           e.type_option_id, t.value AS type_option_value, e.custom_type, \
           e.location_option_id, l.value AS location_option_value, e.custom_location, \
           e.time_option_id, s.value AS time_option_value, e.custom_time, \
           e.date_time, e.is_active, e.created_by, e.created_at, e.updated_at \
    FROM events e \
    LEFT JOIN field_options t ON t.id = e.type_option_id \
    LEFT JOIN field_options l ON l.id = e.location_option_id \
    LEFT JOIN field_options s ON s.id = e.time_option_id";

/// Default page size for event listing.
const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for event listing.
const MAX_LIMIT: i64 = 500;

/// Provides CRUD and scheduling lookups for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning it with option labels resolved.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEvent,
        created_by: Option<DbId>,
    ) -> Result<Event, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO events \
                 (title, description, type_option_id, custom_type, \
                  location_option_id, custom_location, time_option_id, custom_time, \
                  date_time, is_active, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, true), $11) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.type_option_id)
        .bind(&input.custom_type)
        .bind(input.location_option_id)
        .bind(&input.custom_location)
        .bind(input.time_option_id)
        .bind(&input.custom_time)
        .bind(input.date_time)
        .bind(input.is_active)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        let query = format!("{SELECT_EVENT} WHERE e.id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("{SELECT_EVENT} WHERE e.id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events matching `filter`, most recent first.
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter,
        is_active: Option<bool>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);
        let query = format!(
            "{SELECT_EVENT} \
             WHERE ($1::TIMESTAMPTZ IS NULL OR e.date_time >= $1) \
               AND ($2::TIMESTAMPTZ IS NULL OR e.date_time <= $2) \
               AND ($3::BIGINT IS NULL OR e.type_option_id = $3) \
               AND ($4::BOOL IS NULL OR e.is_active = $4) \
             ORDER BY e.date_time DESC, e.id DESC \
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(filter.range.start)
            .bind(filter.range.end)
            .bind(filter.type_option_id)
            .bind(is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The earliest active event scheduled within `[from, to]`.
    pub async fn find_active_between(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "{SELECT_EVENT} \
             WHERE e.is_active = true AND e.date_time BETWEEN $1 AND $2 \
             ORDER BY e.date_time, e.id \
             LIMIT 1"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Replace every editable column of an event.
    ///
    /// The caller merges partial updates onto the current row first, so option
    /// id / custom text pairs are always written together. `is_active` keeps
    /// its current value when `None`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE events SET \
                 title = $2, description = $3, \
                 type_option_id = $4, custom_type = $5, \
                 location_option_id = $6, custom_location = $7, \
                 time_option_id = $8, custom_time = $9, \
                 date_time = $10, is_active = COALESCE($11, is_active) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.type_option_id)
        .bind(&input.custom_type)
        .bind(input.location_option_id)
        .bind(&input.custom_location)
        .bind(input.time_option_id)
        .bind(&input.custom_time)
        .bind(input.date_time)
        .bind(input.is_active)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }
}
