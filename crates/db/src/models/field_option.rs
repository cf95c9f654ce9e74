//! Field option entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use insight_core::types::{DbId, Timestamp};

/// A row from the `field_options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FieldOption {
    pub id: DbId,
    pub field_name: String,
    pub value: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an option. Without `sort_order` it goes to the end of its field.
#[derive(Debug, Deserialize)]
pub struct CreateFieldOption {
    pub field_name: String,
    pub value: String,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// DTO for updating an option. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFieldOption {
    pub value: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// New ordering for the options of one field: ids in display order.
#[derive(Debug, Deserialize)]
pub struct ReorderFieldOptions {
    pub field_name: String,
    pub ids: Vec<DbId>,
}
