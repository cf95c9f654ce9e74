//! Handlers for events: the public active-event lookup and staff management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use sqlx::PgPool;
use insight_core::checkin::active_window;
use insight_core::error::CoreError;
use insight_core::field_options::{
    canonicalize_choice, FIELD_EVENT_TYPE, FIELD_LOCATION, FIELD_TIME,
};
use insight_core::filters::{DateRange, EventFilter};
use insight_core::types::DbId;
use insight_db::models::event::{CreateEvent, EventListParams, EventResponse, UpdateEvent};
use insight_db::repositories::{EventRepo, FieldOptionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of an event title.
const MAX_TITLE_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/events/active
///
/// The active event open for check-in right now (scheduled within two hours
/// either side of the current time).
pub async fn get_active_event(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<EventResponse>>> {
    let (from, to) = active_window(Utc::now());
    let event = EventRepo::find_active_between(&state.pool, from, to)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NothingFound("No active events found".into())))?;

    Ok(Json(DataResponse {
        data: EventResponse::from(event),
    }))
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/events
pub async fn list_events(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<Json<DataResponse<Vec<EventResponse>>>> {
    let filter = EventFilter {
        range: DateRange::parse(params.start_date.as_deref(), params.end_date.as_deref())?,
        type_option_id: params.event_type,
    };
    let events =
        EventRepo::list(&state.pool, &filter, params.is_active, params.limit, params.offset)
            .await?;

    Ok(Json(DataResponse {
        data: events.into_iter().map(EventResponse::from).collect(),
    }))
}

/// GET /api/v1/admin/events/{id}
pub async fn get_event(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EventResponse>>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: EventResponse::from(event),
    }))
}

/// POST /api/v1/admin/events
pub async fn create_event(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    let input = normalize_event(&state.pool, input).await?;
    let event = EventRepo::create(&state.pool, &input, Some(staff.user_id)).await?;

    tracing::info!(
        event_id = event.id,
        title = %event.title,
        user_id = staff.user_id,
        "Event created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: EventResponse::from(event),
        }),
    ))
}

/// PUT /api/v1/admin/events/{id}
///
/// Partial update. A classification pair (option id / custom text) is only
/// touched when the request sets either half of it.
pub async fn update_event(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<DataResponse<EventResponse>>> {
    let current = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;

    let (type_option_id, custom_type) = merge_choice(
        &state.pool,
        FIELD_EVENT_TYPE,
        (input.type_option_id, input.custom_type),
        (current.type_option_id, current.custom_type),
    )
    .await?;
    let (location_option_id, custom_location) = merge_choice(
        &state.pool,
        FIELD_LOCATION,
        (input.location_option_id, input.custom_location),
        (current.location_option_id, current.custom_location),
    )
    .await?;
    let (time_option_id, custom_time) = merge_choice(
        &state.pool,
        FIELD_TIME,
        (input.time_option_id, input.custom_time),
        (current.time_option_id, current.custom_time),
    )
    .await?;

    let mut merged = CreateEvent {
        title: input.title.unwrap_or(current.title),
        description: input.description.or(current.description),
        type_option_id,
        custom_type,
        location_option_id,
        custom_location,
        time_option_id,
        custom_time,
        date_time: input.date_time.unwrap_or(current.date_time),
        is_active: input.is_active,
    };
    normalize_details(&mut merged)?;

    let event = EventRepo::update(&state.pool, id, &merged)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;

    tracing::info!(event_id = id, user_id = staff.user_id, "Event updated");

    Ok(Json(DataResponse {
        data: EventResponse::from(event),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type Choice = (Option<DbId>, Option<String>);

/// A pair counts as supplied when either half is set.
fn is_supplied(pair: &Choice) -> bool {
    pair.0.is_some() || pair.1.is_some()
}

/// Resolve a supplied pair, or keep the stored one as is. A stored option may
/// have been deactivated since; that must not block unrelated edits.
async fn merge_choice(
    pool: &PgPool,
    field_name: &str,
    requested: Choice,
    current: Choice,
) -> AppResult<Choice> {
    if is_supplied(&requested) {
        resolve_choice(pool, field_name, requested.0, requested.1.as_deref()).await
    } else {
        Ok(current)
    }
}

/// Trim and check the title, drop a blank description.
fn normalize_details(input: &mut CreateEvent) -> AppResult<()> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Event title is required".into(),
        )));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Event title must be at most {MAX_TITLE_LEN} characters"
        ))));
    }
    input.title = title.to_string();
    input.description = input
        .description
        .take()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    Ok(())
}

/// Validate a new event and canonicalize all three classification pairs.
async fn normalize_event(pool: &PgPool, mut input: CreateEvent) -> AppResult<CreateEvent> {
    normalize_details(&mut input)?;

    (input.type_option_id, input.custom_type) = resolve_choice(
        pool,
        FIELD_EVENT_TYPE,
        input.type_option_id,
        input.custom_type.as_deref(),
    )
    .await?;
    (input.location_option_id, input.custom_location) = resolve_choice(
        pool,
        FIELD_LOCATION,
        input.location_option_id,
        input.custom_location.as_deref(),
    )
    .await?;
    (input.time_option_id, input.custom_time) = resolve_choice(
        pool,
        FIELD_TIME,
        input.time_option_id,
        input.custom_time.as_deref(),
    )
    .await?;

    Ok(input)
}

/// Check a submitted option id belongs to `field_name` and is active, and fold
/// free text naming an active option into that option.
pub(crate) async fn resolve_choice(
    pool: &PgPool,
    field_name: &str,
    option_id: Option<DbId>,
    custom: Option<&str>,
) -> AppResult<(Option<DbId>, Option<String>)> {
    if let Some(id) = option_id {
        if !FieldOptionRepo::is_active_option(pool, field_name, id).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Option {id} is not an active {field_name} option"
            ))));
        }
        return Ok((Some(id), None));
    }

    let options = FieldOptionRepo::list_by_field(pool, field_name, true).await?;
    Ok(canonicalize_choice(
        None,
        custom,
        options.iter().map(|o| (o.id, o.value.as_str())),
    ))
}
