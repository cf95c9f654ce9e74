use std::sync::Arc;

use crate::config::ServerConfig;
use crate::export::DocumentExporter;
use crate::notifications::email::FeedbackMailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: insight_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Converts the printable report page into a PDF.
    pub exporter: Arc<dyn DocumentExporter>,
    /// Sends feedback-request emails after check-in. `None` when SMTP is not configured.
    pub mailer: Option<Arc<FeedbackMailer>>,
}
