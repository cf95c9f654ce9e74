//! Domain logic for the inSSIght check-in and feedback service.
//!
//! This crate has no database or HTTP dependencies. Callers load data via
//! `insight-db`, hand it to the pure functions here, and serialize the results.

pub mod checkin;
pub mod error;
pub mod feedback;
pub mod field_options;
pub mod filters;
pub mod labels;
pub mod metrics;
pub mod report;
pub mod roles;
pub mod types;
