//! Well-known role name constants.
//!
//! Staff roles must match the `chk_users_role` constraint in the users
//! migration. The student role is never stored; it is only carried in tokens.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_DEPT_HEAD: &str = "dept_head";
pub const ROLE_STUDENT: &str = "student";

/// Roles allowed to use the admin area (dashboard, reports, event management).
pub const STAFF_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_DEPT_HEAD];

/// Whether `role` grants access to the admin area.
pub fn is_staff(role: &str) -> bool {
    STAFF_ROLES.contains(&role)
}
