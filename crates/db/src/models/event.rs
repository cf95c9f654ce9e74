//! Event entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use insight_core::labels::Classification;
use insight_core::types::{DbId, Timestamp};

/// An `events` row joined with the display values of its referenced options.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub type_option_id: Option<DbId>,
    pub type_option_value: Option<String>,
    pub custom_type: Option<String>,
    pub location_option_id: Option<DbId>,
    pub location_option_value: Option<String>,
    pub custom_location: Option<String>,
    pub time_option_id: Option<DbId>,
    pub time_option_value: Option<String>,
    pub custom_time: Option<String>,
    pub date_time: Timestamp,
    pub is_active: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    pub fn event_type(&self) -> Classification {
        Classification::from_parts(
            self.type_option_id,
            self.type_option_value.as_deref(),
            self.custom_type.as_deref(),
        )
    }

    pub fn location(&self) -> Classification {
        Classification::from_parts(
            self.location_option_id,
            self.location_option_value.as_deref(),
            self.custom_location.as_deref(),
        )
    }

    pub fn time_slot(&self) -> Classification {
        Classification::from_parts(
            self.time_option_id,
            self.time_option_value.as_deref(),
            self.custom_time.as_deref(),
        )
    }
}

/// Event as returned by the API, with each categorical field resolved.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    pub event_type: Classification,
    pub location: Classification,
    pub time_slot: Classification,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            event_type: event.event_type(),
            location: event.location(),
            time_slot: event.time_slot(),
            event,
        }
    }
}

/// DTO for creating an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub type_option_id: Option<DbId>,
    pub custom_type: Option<String>,
    pub location_option_id: Option<DbId>,
    pub custom_location: Option<String>,
    pub time_option_id: Option<DbId>,
    pub custom_time: Option<String>,
    pub date_time: Timestamp,
    pub is_active: Option<bool>,
}

/// DTO for updating an event. All fields are optional.
///
/// Setting an option id for a categorical field clears its custom text and
/// vice versa; the repository receives the already-resolved pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub type_option_id: Option<DbId>,
    pub custom_type: Option<String>,
    pub location_option_id: Option<DbId>,
    pub custom_location: Option<String>,
    pub time_option_id: Option<DbId>,
    pub custom_time: Option<String>,
    pub date_time: Option<Timestamp>,
    pub is_active: Option<bool>,
}

/// Query parameters for listing events.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub event_type: Option<DbId>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
