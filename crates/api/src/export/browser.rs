//! HTTP client for a headless-browser PDF rendering service.
//!
//! The service accepts `POST /pdf` with `{ "url": ..., "options": ... }`,
//! navigates to the URL, waits for the network to go idle, and answers with
//! the PDF bytes.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{DocumentExporter, ExportError, PdfOptions};

/// Magic bytes every PDF document starts with.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Connection settings for the PDF service.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Base URL of the rendering service.
    pub service_url: String,
    /// Total time allowed for one render, in seconds.
    pub timeout_secs: u64,
}

impl ExportConfig {
    /// Load export configuration from environment variables.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `PDF_SERVICE_URL`          | `http://localhost:3001` |
    /// | `PDF_SERVICE_TIMEOUT_SECS` | `60`                    |
    pub fn from_env() -> Self {
        let service_url = std::env::var("PDF_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("PDF_SERVICE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("PDF_SERVICE_TIMEOUT_SECS must be a valid u64");

        Self {
            service_url,
            timeout_secs,
        }
    }
}

/// [`DocumentExporter`] backed by the rendering service.
pub struct BrowserPdfClient {
    client: reqwest::Client,
    service_url: String,
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    url: &'a str,
    options: &'a PdfOptions,
}

impl BrowserPdfClient {
    pub fn new(config: &ExportConfig) -> Result<Self, ExportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            service_url: config.service_url.clone(),
        })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or return
    /// [`ExportError::ApiError`] with the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ExportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ExportError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentExporter for BrowserPdfClient {
    async fn export_pdf(&self, url: &str, options: &PdfOptions) -> Result<Vec<u8>, ExportError> {
        tracing::debug!(service = %self.service_url, "Requesting PDF render");

        let response = self
            .client
            .post(format!("{}/pdf", self.service_url))
            .json(&RenderRequest { url, options })
            .send()
            .await?;

        let bytes = Self::ensure_success(response).await?.bytes().await?;
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(ExportError::InvalidDocument(
                "response is not a PDF document".into(),
            ));
        }

        tracing::debug!(size = bytes.len(), "PDF rendered");
        Ok(bytes.to_vec())
    }
}
