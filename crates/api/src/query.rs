//! Shared query parameter types for API handlers.

use serde::Deserialize;

use insight_core::error::CoreError;
use insight_core::filters::{DateRange, EventFilter};
use insight_core::types::DbId;

/// `?field_name=&include_inactive=` for the staff option list.
#[derive(Debug, Deserialize)]
pub struct FieldOptionListParams {
    pub field_name: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?start_date=&end_date=&event_type=` as accepted by the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct EventFilterParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Field option id of the event type to restrict to.
    pub event_type: Option<DbId>,
}

impl EventFilterParams {
    pub fn to_filter(&self) -> Result<EventFilter, CoreError> {
        Ok(EventFilter {
            range: DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())?,
            type_option_id: self.event_type,
        })
    }
}
