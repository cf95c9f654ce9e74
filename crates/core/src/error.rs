use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup that is not keyed by id came back empty (e.g. no active event).
    #[error("Not found: {0}")]
    NothingFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A record that may only exist once already exists. The existing id is
    /// returned to the client so it can continue with that record.
    #[error("{message} (existing {entity} id {existing_id})")]
    AlreadyExists {
        entity: &'static str,
        existing_id: DbId,
        message: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
