//! Feedback-request emails via SMTP.
//!
//! [`FeedbackMailer`] wraps the `lettre` async SMTP transport and sends a
//! multipart (HTML + plain text) message rendered from askama templates.
//! If `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns `None` and no
//! mailer is constructed.

use askama::Template;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// A message template failed to render.
    #[error("Email template error: {0}")]
    Template(#[from] askama::Error),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "no-reply@inssight.local";

/// Display name on outgoing mail.
const SENDER_NAME: &str = "inSSIght";

const FEEDBACK_SUBJECT: &str = "Feedback Request";

/// Configuration for the SMTP transport.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// Sender address (without display name).
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      | --                         |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `no-reply@inssight.local`  |
    /// | `SMTP_USER`     | no       | --                         |
    /// | `SMTP_PASSWORD` | no       | --                         |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "emails/feedback_request.html")]
struct FeedbackRequestHtml<'a> {
    student_name: &'a str,
    event_title: &'a str,
    feedback_url: &'a str,
}

#[derive(Template)]
#[template(path = "emails/feedback_request.txt")]
struct FeedbackRequestText<'a> {
    student_name: &'a str,
    event_title: &'a str,
    feedback_url: &'a str,
}

/// Render the `(html, plain_text)` bodies of a feedback request.
pub fn render_feedback_request(
    student_name: &str,
    event_title: &str,
    feedback_url: &str,
) -> Result<(String, String), EmailError> {
    let html = FeedbackRequestHtml {
        student_name,
        event_title,
        feedback_url,
    }
    .render()?;
    let text = FeedbackRequestText {
        student_name,
        event_title,
        feedback_url,
    }
    .render()?;
    Ok((html, text))
}

// ---------------------------------------------------------------------------
// FeedbackMailer
// ---------------------------------------------------------------------------

/// Sends feedback-request emails via SMTP.
pub struct FeedbackMailer {
    config: EmailConfig,
}

impl FeedbackMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Ask a student to leave feedback for an event they just attended.
    pub async fn send_feedback_request(
        &self,
        to_email: &str,
        student_name: &str,
        event_title: &str,
        feedback_url: &str,
    ) -> Result<(), EmailError> {
        let (html_body, text_body) =
            render_feedback_request(student_name, event_title, feedback_url)?;

        let from: Mailbox = format!("{SENDER_NAME} <{}>", self.config.from_address).parse()?;

        let email = Message::builder()
            .from(from)
            .to(to_email.parse()?)
            .subject(FEEDBACK_SUBJECT)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(to = to_email, event_title, "Feedback request email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_request_mentions_event_and_link() {
        let (html, text) = render_feedback_request(
            "Ada",
            "Career Fair",
            "http://localhost:5173/feedback?attendanceId=12",
        )
        .unwrap();

        assert!(text.contains("Hello Ada,"));
        assert!(text.contains("Thank you for attending our event: Career Fair."));
        assert!(text.contains("http://localhost:5173/feedback?attendanceId=12"));
        assert!(text.contains("The inSSIght Team"));

        assert!(html.contains("Career Fair"));
        assert!(html.contains("attendanceId=12"));
    }

    #[test]
    fn html_body_escapes_event_title() {
        let (html, _) = render_feedback_request("Ada", "<script>x</script>", "http://x").unwrap();
        assert!(!html.contains("<script>x</script>"));
    }
}
