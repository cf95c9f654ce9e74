//! Resolution of "predefined option or free text" fields into display labels.
//!
//! Events (type, location, time slot), attendances (role) and feedback
//! (heard-via) all store a nullable option reference next to a nullable custom
//! text column. [`Classification`] folds each pair into one value so the
//! aggregator and the report renderer apply the same fallback order.

use serde::Serialize;

use crate::types::DbId;

/// Placeholder used when bucketing aggregates by label.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Placeholder used in report cells.
pub const NOT_AVAILABLE_LABEL: &str = "N/A";

/// A categorical value that is either a predefined option, free text, or unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// A reference to a `field_options` row, with its display value.
    Predefined { id: DbId, label: String },
    /// Free text typed in place of a predefined option.
    Custom { text: String },
    Unset,
}

impl Classification {
    /// Build a classification from the nullable column pair.
    ///
    /// An option id only counts when its display value was loaded alongside it
    /// (a dangling id falls through to the custom text). Empty or
    /// whitespace-only strings are treated as absent.
    pub fn from_parts(
        option_id: Option<DbId>,
        option_label: Option<&str>,
        custom: Option<&str>,
    ) -> Self {
        if let (Some(id), Some(label)) = (option_id, non_blank(option_label)) {
            return Classification::Predefined {
                id,
                label: label.to_string(),
            };
        }
        match non_blank(custom) {
            Some(text) => Classification::Custom {
                text: text.to_string(),
            },
            None => Classification::Unset,
        }
    }

    /// The display label, or `placeholder` when unset.
    pub fn resolve<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self {
            Classification::Predefined { label, .. } => label,
            Classification::Custom { text } => text,
            Classification::Unset => placeholder,
        }
    }

    /// Label for aggregation buckets (`"Unknown"` when unset).
    pub fn bucket_label(&self) -> &str {
        self.resolve(UNKNOWN_LABEL)
    }

    /// Label for report cells (`"N/A"` when unset).
    pub fn display_label(&self) -> &str {
        self.resolve(NOT_AVAILABLE_LABEL)
    }

    pub fn option_id(&self) -> Option<DbId> {
        match self {
            Classification::Predefined { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Classification::Unset)
    }
}

/// Resolve an attendee role for reports.
///
/// The check-in form submits `role = "other"` together with the typed text, so
/// custom text wins over the role value here.
pub fn resolve_attendee_role(role: Option<&str>, custom_role: Option<&str>) -> String {
    non_blank(custom_role)
        .or_else(|| non_blank(role))
        .unwrap_or(DEFAULT_ATTENDEE_ROLE)
        .to_string()
}

/// Role shown for attendees that did not pick one.
pub const DEFAULT_ATTENDEE_ROLE: &str = "Attendee";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
