//! JWT generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. Staff and
//! students receive access tokens; the PDF endpoint additionally mints
//! short-lived report tokens that only open the printable report page.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use insight_core::roles::ROLE_STUDENT;
use insight_core::types::DbId;

/// Scope carried by report tokens.
pub const SCOPE_REPORT: &str = "report";

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user id for staff, the student id for students.
    pub sub: DbId,
    /// `"admin"`, `"dept_head"` or `"student"`.
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
    /// Normalized student number, present on student tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
    /// Restricts what the token may be used for. Access tokens have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 720).
    pub access_token_expiry_mins: i64,
    /// Report token lifetime in seconds (default: 120).
    pub report_token_expiry_secs: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 720;
/// Default report token expiry in seconds.
const DEFAULT_REPORT_EXPIRY_SECS: i64 = 120;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `720`   |
    /// | `JWT_REPORT_EXPIRY_SECS`   | no       | `120`   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let report_token_expiry_secs: i64 = std::env::var("JWT_REPORT_EXPIRY_SECS")
            .unwrap_or_else(|_| DEFAULT_REPORT_EXPIRY_SECS.to_string())
            .parse()
            .expect("JWT_REPORT_EXPIRY_SECS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            report_token_expiry_secs,
        }
    }
}

/// Generate an HS256 access token for a staff user.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        user_id,
        role,
        None,
        None,
        config.access_token_expiry_mins * 60,
        config,
    )
}

/// Generate an HS256 access token for a student.
pub fn generate_student_token(
    student_id: DbId,
    student_number: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        student_id,
        ROLE_STUDENT,
        Some(student_number.to_string()),
        None,
        config.access_token_expiry_mins * 60,
        config,
    )
}

/// Generate a short-lived token that only grants access to the printable
/// report page. Handed to the PDF service in the page URL.
pub fn generate_report_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        user_id,
        role,
        None,
        Some(SCOPE_REPORT.to_string()),
        config.report_token_expiry_secs,
        config,
    )
}

fn sign(
    sub: DbId,
    role: &str,
    student_number: Option<String>,
    scope: Option<String>,
    lifetime_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub,
        role: role.to_string(),
        exp: now + lifetime_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
        student_number,
        scope,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration. Scope checks are left to the
/// extractors.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
