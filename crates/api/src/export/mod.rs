//! PDF export of printable report pages.
//!
//! Rendering is delegated to an external headless-browser service behind the
//! [`DocumentExporter`] trait, so tests can swap in a fake.

pub mod browser;

use async_trait::async_trait;
use serde::Serialize;

pub use browser::{BrowserPdfClient, ExportConfig};

/// Page margins in CSS units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMargins {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl PageMargins {
    pub fn uniform(value: &str) -> Self {
        Self {
            top: value.to_string(),
            right: value.to_string(),
            bottom: value.to_string(),
            left: value.to_string(),
        }
    }
}

/// Print options forwarded to the browser's print-to-PDF call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    pub format: String,
    pub print_background: bool,
    pub margin: PageMargins,
}

impl Default for PdfOptions {
    /// A4 with backgrounds and 1cm margins on every side.
    fn default() -> Self {
        Self {
            format: "A4".to_string(),
            print_background: true,
            margin: PageMargins::uniform("1cm"),
        }
    }
}

/// Errors from the document export layer.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The export service returned a non-2xx status code.
    #[error("PDF service error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The service answered but the document was unusable.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Converts a web page into a PDF document.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Load `url` and return the rendered PDF bytes.
    async fn export_pdf(&self, url: &str, options: &PdfOptions) -> Result<Vec<u8>, ExportError>;
}
