//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the principal from a JWT Bearer token.
//! - [`auth::ReportViewer`] -- Staff principal from a header or a `?token=` report token.
//! - [`rbac::RequireStaff`] -- Requires `admin` or `dept_head`.

pub mod auth;
pub mod rbac;
