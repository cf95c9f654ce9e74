//! Integration tests for report data, the printable page and PDF export.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{
    body_bytes, body_json, body_text, check_in, create_admin, create_event_at, create_student,
    event_input, get, get_auth, give_feedback, staff_token, student_token, test_config, FAKE_PDF,
};
use insight_api::auth::jwt::generate_report_token;
use insight_db::models::event::Event;
use sqlx::PgPool;

/// An untyped event on 2025-03-14 with two attendances, one with feedback.
async fn seed_event(pool: &PgPool) -> Event {
    let event =
        create_event_at(pool, event_input("Quiet Hour", "2025-03-14T15:00:00Z".parse().unwrap()))
            .await;
    let a = create_student(pool, "S00000001", None).await;
    let b = create_student(pool, "S00000002", None).await;
    let att_a = check_in(pool, a.id, event.id).await;
    check_in(pool, b.id, event.id).await;
    give_feedback(pool, att_a.id, Some(4), Some(0)).await;
    event
}

// ---------------------------------------------------------------------------
// JSON report
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_attendance_report(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let event = seed_event(&pool).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/admin/reports?event_id={}", event.id);
    let response = get_auth(app, &uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["type"], "attendance");
    assert_eq!(data["scope"]["kind"], "event");
    assert_eq!(data["scope"]["event_type"], "N/A");
    assert_eq!(data["scope"]["location"], "N/A");
    assert_eq!(data["summary"]["total_attendees"], 2);
    assert_eq!(data["summary"]["response_rate_percent"], 50);

    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["student_number"], "S00000001");
    assert_eq!(rows[0]["role"], "Attendee");
    assert!(rows[0].get("event_title").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_range_feedback_report(pool: PgPool) {
    let admin = create_admin(&pool).await;
    seed_event(&pool).await;
    let app = common::build_test_app(pool);

    let uri = "/api/v1/admin/reports?type=feedback&start_date=2025-03-01&end_date=2025-03-14";
    let response = get_auth(app, uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["type"], "feedback");
    assert_eq!(data["scope"]["kind"], "range");
    assert_eq!(data["summary"]["total_submissions"], 1);
    assert_eq!(data["summary"]["average_rating"], 4.0);

    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["event_title"], "Quiet Hour");
    assert_eq!(rows[0]["recommend_score"], 0);
    assert_eq!(rows[0]["heard_via"], "N/A");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_range_attendance_rows_show_unknown_type_as_na(pool: PgPool) {
    let admin = create_admin(&pool).await;
    seed_event(&pool).await;
    let app = common::build_test_app(pool);

    let uri = "/api/v1/admin/reports?start_date=2025-03-14&end_date=2025-03-14";
    let response = get_auth(app, uri, &staff_token(&admin)).await;

    let data = &body_json(response).await["data"];
    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2, "a date-only end includes the whole day");
    assert_eq!(rows[0]["event_type"], "N/A");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_without_scope_returns_400(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let app = common::build_test_app(pool);

    let uri = "/api/v1/admin/reports?type=attendance&start_date=2025-03-01";
    let response = get_auth(app, uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Either event_id or a date range (start_date and end_date) is required"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_with_invalid_type_returns_400(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let event = seed_event(&pool).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/admin/reports?type=sales&event_id={}", event.id);
    let response = get_auth(app, &uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_for_unknown_event_returns_404(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let app = common::build_test_app(pool);

    let uri = "/api/v1/admin/reports?event_id=999999";
    let response = get_auth(app, uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Printable page
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_printable_page_accepts_report_token(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let event = seed_event(&pool).await;
    let token = generate_report_token(admin.id, &admin.role, &test_config().jwt).unwrap();
    let app = common::build_test_app(pool);

    let uri = format!(
        "/api/v1/reports/printable?type=attendance&event_id={}&token={token}",
        event.id
    );
    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("Attendance Report"));
    assert!(html.contains("Event: Quiet Hour (2025-03-14)"));
    assert!(html.contains("Type: N/A | Location: N/A"));
    assert!(html.contains("50%"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_printable_feedback_page_shows_zero_score(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let event = seed_event(&pool).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/reports/printable?type=feedback&event_id={}", event.id);
    let response = get_auth(app, &uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Feedback Report"));
    assert!(html.contains("<td>0</td>"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_printable_page_requires_credentials(pool: PgPool) {
    let event = seed_event(&pool).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/reports/printable?event_id={}", event.id);
    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_printable_page_rejects_students(pool: PgPool) {
    let event = seed_event(&pool).await;
    let student = create_student(&pool, "S99999999", None).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/reports/printable?event_id={}", event.id);
    let response = get_auth(app, &uri, &student_token(&student)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// PDF export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pdf_export_returns_attachment(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let event = seed_event(&pool).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/admin/reports/pdf?type=feedback&event_id={}", event.id);
    let response = get_auth(app, &uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/pdf");
    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"feedback_report_"));
    assert!(disposition.ends_with(".pdf\""));
    assert_eq!(body_bytes(response).await, FAKE_PDF);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pdf_export_validates_before_exporting(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/reports/pdf", &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
