//! Student identity and check-in window rules.

use std::sync::OnceLock;

use chrono::Duration;
use regex::Regex;

use crate::error::CoreError;
use crate::types::Timestamp;

/// An event accepts check-ins from this many hours before its scheduled time
/// until this many hours after.
pub const ACTIVE_WINDOW_HOURS: i64 = 2;

/// Name given to students registered on first login.
pub const DEFAULT_STUDENT_NAME: &str = "Student";

/// Roles offered on the check-in form. `other` comes with free text.
pub const ATTENDEE_ROLES: &[&str] = &["attendee", "presenter", "volunteer", "other"];

/// Maximum length of a free-text attendee role.
pub const MAX_CUSTOM_ROLE_LEN: usize = 100;

fn student_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^S[0-9]{8}$").expect("student number regex is valid"))
}

/// Normalize a student number as typed (`" s12345678 "` -> `"S12345678"`).
///
/// A student number is an `S` followed by eight digits.
pub fn normalize_student_number(raw: &str) -> Result<String, CoreError> {
    let normalized = raw.trim().to_uppercase();
    if !student_number_pattern().is_match(&normalized) {
        return Err(CoreError::Validation(
            "Invalid Student ID format. Should be S followed by 8 digits.".into(),
        ));
    }
    Ok(normalized)
}

/// Check the submitted role pair and return it trimmed, blanks dropped.
pub fn normalize_attendee_role(
    role: Option<&str>,
    custom_role: Option<&str>,
) -> Result<(Option<String>, Option<String>), CoreError> {
    let role = role.map(str::trim).filter(|r| !r.is_empty());
    if let Some(r) = role {
        if !ATTENDEE_ROLES.contains(&r) {
            return Err(CoreError::Validation(format!(
                "Invalid role '{r}'. Must be one of: {}",
                ATTENDEE_ROLES.join(", ")
            )));
        }
    }
    let custom_role = custom_role.map(str::trim).filter(|r| !r.is_empty());
    if let Some(c) = custom_role {
        if c.chars().count() > MAX_CUSTOM_ROLE_LEN {
            return Err(CoreError::Validation(format!(
                "Custom role must be at most {MAX_CUSTOM_ROLE_LEN} characters"
            )));
        }
    }
    Ok((role.map(String::from), custom_role.map(String::from)))
}

/// The `[from, to]` range of event start times that are open for check-in at `now`.
pub fn active_window(now: Timestamp) -> (Timestamp, Timestamp) {
    let span = Duration::hours(ACTIVE_WINDOW_HOURS);
    (now - span, now + span)
}
