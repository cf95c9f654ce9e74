//! Handlers for form field options (event types, locations, time slots,
//! heard-via channels).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use insight_core::error::CoreError;
use insight_core::field_options::{validate_field_name, validate_option_value};
use insight_core::types::DbId;
use insight_db::models::field_option::{
    CreateFieldOption, FieldOption, ReorderFieldOptions, UpdateFieldOption,
};
use insight_db::repositories::FieldOptionRepo;

use crate::error::{is_foreign_key_violation, AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::FieldOptionListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/field-options/{field_name}
///
/// Active options for one form field, in display order.
pub async fn list_active_options(
    State(state): State<AppState>,
    Path(field_name): Path<String>,
) -> AppResult<Json<DataResponse<Vec<FieldOption>>>> {
    validate_field_name(&field_name)?;
    let options = FieldOptionRepo::list_by_field(&state.pool, &field_name, true).await?;
    Ok(Json(DataResponse { data: options }))
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/field-options?field_name=&include_inactive=
///
/// Options for one field, or every option of every field (deactivated ones
/// included) when `field_name` is omitted.
pub async fn list_options(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<FieldOptionListParams>,
) -> AppResult<Json<DataResponse<Vec<FieldOption>>>> {
    let options = match params.field_name.as_deref() {
        Some(field_name) => {
            validate_field_name(field_name)?;
            FieldOptionRepo::list_by_field(&state.pool, field_name, !params.include_inactive)
                .await?
        }
        None => FieldOptionRepo::list_all(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: options }))
}

/// POST /api/v1/admin/field-options
pub async fn create_option(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<CreateFieldOption>,
) -> AppResult<impl IntoResponse> {
    validate_field_name(&input.field_name)?;
    input.value = validate_option_value(&input.value)?;

    let option = FieldOptionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        option_id = option.id,
        field_name = %option.field_name,
        value = %option.value,
        user_id = staff.user_id,
        "Field option created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: option })))
}

/// PUT /api/v1/admin/field-options/{id}
pub async fn update_option(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateFieldOption>,
) -> AppResult<Json<DataResponse<FieldOption>>> {
    if let Some(value) = &input.value {
        input.value = Some(validate_option_value(value)?);
    }

    let option = FieldOptionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FieldOption",
            id,
        }))?;

    tracing::info!(option_id = id, user_id = staff.user_id, "Field option updated");

    Ok(Json(DataResponse { data: option }))
}

/// DELETE /api/v1/admin/field-options/{id}
///
/// Options referenced by events or feedback cannot be deleted; deactivate
/// them instead.
pub async fn delete_option(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = match FieldOptionRepo::delete(&state.pool, id).await {
        Ok(deleted) => deleted,
        Err(err) if is_foreign_key_violation(&err) => {
            return Err(AppError::Core(CoreError::Conflict(
                "Option is in use; deactivate it instead".into(),
            )));
        }
        Err(err) => return Err(err.into()),
    };
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "FieldOption",
            id,
        }));
    }

    tracing::info!(option_id = id, user_id = staff.user_id, "Field option deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/field-options/reorder
///
/// Set the display order of one field's options to the order of `ids`.
pub async fn reorder_options(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<ReorderFieldOptions>,
) -> AppResult<Json<DataResponse<Vec<FieldOption>>>> {
    validate_field_name(&input.field_name)?;
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }

    let options = FieldOptionRepo::reorder(&state.pool, &input.field_name, &input.ids).await?;

    tracing::info!(
        field_name = %input.field_name,
        count = input.ids.len(),
        user_id = staff.user_id,
        "Field options reordered",
    );

    Ok(Json(DataResponse { data: options }))
}
