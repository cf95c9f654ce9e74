//! Server-rendered HTML pages.
//!
//! - [`report`] -- printable attendance and feedback reports.

pub mod report;
