//! Form field option categories and value rules.

use crate::error::CoreError;
use crate::types::DbId;

pub const FIELD_EVENT_TYPE: &str = "event_type";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_TIME: &str = "time";
pub const FIELD_HEARD_VIA: &str = "heard_via";

/// Every field name that can carry predefined options.
pub const FIELD_NAMES: &[&str] = &[FIELD_EVENT_TYPE, FIELD_LOCATION, FIELD_TIME, FIELD_HEARD_VIA];

/// Maximum length of an option's display value.
pub const MAX_OPTION_VALUE_LEN: usize = 100;

pub fn validate_field_name(field_name: &str) -> Result<(), CoreError> {
    if FIELD_NAMES.contains(&field_name) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown field '{field_name}'. Must be one of: {}",
            FIELD_NAMES.join(", ")
        )))
    }
}

/// Trim an option value and check it is non-empty and not too long.
pub fn validate_option_value(value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Option value must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_OPTION_VALUE_LEN {
        return Err(CoreError::Validation(format!(
            "Option value must be at most {MAX_OPTION_VALUE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Find the option whose value equals `text`, ignoring case and surrounding
/// whitespace. `options` yields `(id, value)` pairs.
pub fn match_option<'a, I>(options: I, text: &str) -> Option<DbId>
where
    I: IntoIterator<Item = (DbId, &'a str)>,
{
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    options
        .into_iter()
        .find(|(_, value)| value.trim().to_lowercase() == needle)
        .map(|(id, _)| id)
}

/// Split a submitted (option id, custom text) pair into what gets stored.
///
/// An explicit option id wins and clears the custom text. Otherwise custom
/// text that names an existing option is folded into that option.
pub fn canonicalize_choice<'a, I>(
    option_id: Option<DbId>,
    custom: Option<&str>,
    options: I,
) -> (Option<DbId>, Option<String>)
where
    I: IntoIterator<Item = (DbId, &'a str)>,
{
    if option_id.is_some() {
        return (option_id, None);
    }
    let custom = custom.map(str::trim).filter(|s| !s.is_empty());
    match custom {
        Some(text) => match match_option(options, text) {
            Some(id) => (Some(id), None),
            None => (None, Some(text.to_string())),
        },
        None => (None, None),
    }
}
