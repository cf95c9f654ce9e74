//! Handlers for the `/auth` resource (staff login, student login, current principal).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use insight_core::checkin::{normalize_student_number, DEFAULT_STUDENT_NAME};
use insight_core::error::CoreError;
use insight_db::models::student::Student;
use insight_db::models::user::UserResponse;
use insight_db::repositories::{StudentRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_student_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::handlers::validate_body;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Request body for `POST /auth/student-login`.
#[derive(Debug, Deserialize)]
pub struct StudentLoginRequest {
    /// Student number as typed, e.g. `s12345678`.
    pub student_number: String,
}

/// Successful staff login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Successful student login.
#[derive(Debug, Serialize)]
pub struct StudentAuthResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub student: Student,
}

/// The current principal. Exactly one of `user` and `student` is set.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate a staff member with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_body(&input)?;

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed staff login");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "Staff logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(&user),
    }))
}

/// POST /api/v1/auth/student-login
///
/// Sign a student in by student number alone. Unknown students are
/// registered on the spot with a placeholder name.
pub async fn student_login(
    State(state): State<AppState>,
    Json(input): Json<StudentLoginRequest>,
) -> AppResult<Json<StudentAuthResponse>> {
    let student_number = normalize_student_number(&input.student_number)?;

    let student =
        StudentRepo::find_or_create(&state.pool, &student_number, DEFAULT_STUDENT_NAME).await?;

    let access_token =
        generate_student_token(student.id, &student.student_number, &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(student_id = student.id, "Student logged in");

    Ok(Json(StudentAuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        student,
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<MeResponse>>> {
    let data = if auth.is_student() {
        let student = StudentRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Student no longer exists".into()))
            })?;
        MeResponse {
            role: auth.role,
            user: None,
            student: Some(student),
        }
    } else {
        let user = UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
            })?;
        MeResponse {
            role: auth.role,
            user: Some(UserResponse::from(&user)),
            student: None,
        }
    };

    Ok(Json(DataResponse { data }))
}
