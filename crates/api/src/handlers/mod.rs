//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers validate input, delegate to the repositories in `insight_db` and
//! the pure logic in `insight_core`, and map errors via [`AppError`].

pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod events;
pub mod feedback;
pub mod field_options;
pub mod reports;
pub mod students;

use validator::Validate;

use crate::error::AppError;

/// Run `validator` rules on a request body, reporting the first failing
/// field as a 400.
pub(crate) fn validate_body<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let detail = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field}: {detail}")
            })
            .next()
            .unwrap_or_else(|| "Invalid request body".to_string());
        AppError::BadRequest(message)
    })
}
