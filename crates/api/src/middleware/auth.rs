//! JWT-based authentication extractors for Axum handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use insight_core::error::CoreError;
use insight_core::roles::{is_staff, ROLE_STUDENT};
use insight_core::types::DbId;

use crate::auth::jwt::{validate_token, Claims, SCOPE_REPORT};
use crate::error::AppError;
use crate::state::AppState;

/// Principal extracted from a JWT Bearer token in the `Authorization` header.
///
/// Staff and students both authenticate this way. Scoped tokens (report
/// tokens) are rejected here; they are only accepted by [`ReportViewer`].
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Staff user id, or student id when `role` is `"student"`.
    pub user_id: DbId,
    /// `"admin"`, `"dept_head"` or `"student"`.
    pub role: String,
    /// Normalized student number for student principals.
    pub student_number: Option<String>,
}

impl AuthUser {
    pub fn is_student(&self) -> bool {
        self.role == ROLE_STUDENT
    }

    pub fn is_staff(&self) -> bool {
        is_staff(&self.role)
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            student_number: claims.student_number,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

        let claims = decode(token, state)?;
        if claims.scope.is_some() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Token is not valid for this endpoint".into(),
            )));
        }

        Ok(AuthUser::from(claims))
    }
}

/// Staff principal allowed to view a printable report.
///
/// Accepts either a regular staff access token in the `Authorization` header
/// or a report-scoped token in the `token` query parameter. The headless
/// browser rendering a PDF cannot send headers, so the PDF endpoint mints the
/// latter.
#[derive(Debug, Clone)]
pub struct ReportViewer(pub AuthUser);

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl FromRequestParts<AppState> for ReportViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = match bearer_token(parts)? {
            Some(token) => decode(token, state)?,
            None => {
                let Query(query) = Query::<TokenQuery>::try_from_uri(&parts.uri)
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                let token = query.token.filter(|t| !t.is_empty()).ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "Missing Authorization header or token parameter".into(),
                    ))
                })?;
                decode(&token, state)?
            }
        };

        match claims.scope.as_deref() {
            None | Some(SCOPE_REPORT) => {}
            Some(_) => {
                return Err(AppError::Core(CoreError::Unauthorized(
                    "Token is not valid for this endpoint".into(),
                )))
            }
        }

        let user = AuthUser::from(claims);
        if !user.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )));
        }
        Ok(ReportViewer(user))
    }
}

/// The Bearer token from the `Authorization` header, if the header is present.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(auth_header) = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
    else {
        return Ok(None);
    };

    auth_header.strip_prefix("Bearer ").map(Some).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })
}

fn decode(token: &str, state: &AppState) -> Result<Claims, AppError> {
    validate_token(token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))
}
