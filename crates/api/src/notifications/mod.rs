//! Outbound notifications.
//!
//! - [`email`] -- feedback-request emails sent after a check-in.

pub mod email;
