//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod dashboard_repo;
pub mod event_repo;
pub mod feedback_repo;
pub mod field_option_repo;
pub mod report_repo;
pub mod student_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use dashboard_repo::DashboardRepo;
pub use event_repo::EventRepo;
pub use feedback_repo::FeedbackRepo;
pub use field_option_repo::FieldOptionRepo;
pub use report_repo::ReportRepo;
pub use student_repo::StudentRepo;
pub use user_repo::UserRepo;
