//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where rows are editable

pub mod attendance;
pub mod dashboard;
pub mod event;
pub mod feedback;
pub mod field_option;
pub mod report;
pub mod student;
pub mod user;
