#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use insight_api::auth::jwt::{generate_access_token, generate_student_token, JwtConfig};
use insight_api::auth::password::hash_password;
use insight_api::config::ServerConfig;
use insight_api::export::{DocumentExporter, ExportError, PdfOptions};
use insight_api::router::build_app_router;
use insight_api::state::AppState;
use insight_core::types::{DbId, Timestamp};
use insight_db::models::attendance::{Attendance, CreateAttendance};
use insight_db::models::event::{CreateEvent, Event};
use insight_db::models::feedback::{CreateFeedback, Feedback};
use insight_db::models::student::{CreateStudent, Student};
use insight_db::models::user::{CreateUser, User};
use insight_db::repositories::{AttendanceRepo, EventRepo, FeedbackRepo, StudentRepo, UserRepo};

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Bytes returned by [`FakeExporter`] for every export.
pub const FAKE_PDF: &[u8] = b"%PDF-1.4 fake";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://localhost:3000".to_string(),
        app_base_url: "http://localhost:5173".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            report_token_expiry_secs: 120,
        },
    }
}

/// Exporter that never leaves the process.
pub struct FakeExporter;

#[async_trait]
impl DocumentExporter for FakeExporter {
    async fn export_pdf(&self, url: &str, _options: &PdfOptions) -> Result<Vec<u8>, ExportError> {
        if !url.contains("token=") {
            return Err(ExportError::InvalidDocument("missing report token".into()));
        }
        Ok(FAKE_PDF.to_vec())
    }
}

/// Build the full application router using the given database pool.
///
/// Goes through the same builder as `main.rs`, so tests exercise the
/// production middleware stack. Email is disabled.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        exporter: Arc::new(FakeExporter),
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn staff_token(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt).unwrap()
}

pub fn student_token(student: &Student) -> String {
    generate_student_token(student.id, &student.student_number, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Create a staff account with [`TEST_PASSWORD`].
pub async fn create_staff(pool: &PgPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        name: Some("Test Staff".to_string()),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

pub async fn create_admin(pool: &PgPool) -> User {
    create_staff(pool, "admin@test.com", "admin").await
}

pub async fn create_student(pool: &PgPool, student_number: &str, email: Option<&str>) -> Student {
    let input = CreateStudent {
        student_number: student_number.to_string(),
        name: format!("Student {student_number}"),
        email: email.map(str::to_string),
        major: None,
        year: None,
    };
    StudentRepo::create(pool, &input).await.unwrap()
}

/// Id of a seeded option, looked up by field and value.
pub async fn option_id(pool: &PgPool, field_name: &str, value: &str) -> DbId {
    sqlx::query_scalar("SELECT id FROM field_options WHERE field_name = $1 AND value = $2")
        .bind(field_name)
        .bind(value)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn event_input(title: &str, date_time: Timestamp) -> CreateEvent {
    CreateEvent {
        title: title.to_string(),
        description: None,
        type_option_id: None,
        custom_type: None,
        location_option_id: None,
        custom_location: None,
        time_option_id: None,
        custom_time: None,
        date_time,
        is_active: None,
    }
}

/// An untyped event happening now.
pub async fn create_event(pool: &PgPool, title: &str) -> Event {
    EventRepo::create(pool, &event_input(title, Utc::now()), None)
        .await
        .unwrap()
}

pub async fn create_event_at(pool: &PgPool, input: CreateEvent) -> Event {
    EventRepo::create(pool, &input, None).await.unwrap()
}

pub async fn check_in(pool: &PgPool, student_id: DbId, event_id: DbId) -> Attendance {
    let input = CreateAttendance {
        student_id,
        event_id,
        role: None,
        custom_role: None,
    };
    AttendanceRepo::create(pool, &input).await.unwrap()
}

pub async fn give_feedback(
    pool: &PgPool,
    attendance_id: DbId,
    rating: Option<i32>,
    recommend_score: Option<i32>,
) -> Feedback {
    let input = CreateFeedback {
        attendance_id,
        rating,
        recommend_score,
        heard_via_option_id: None,
        custom_heard_via: None,
        open_ended: serde_json::json!({}),
    };
    FeedbackRepo::create(pool, &input).await.unwrap()
}

/// `now` shifted by whole days, for placing events in date ranges.
pub fn days_from_now(days: i64) -> Timestamp {
    Utc::now() + Duration::days(days)
}
