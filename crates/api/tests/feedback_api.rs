//! Integration tests for feedback submission.

mod common;

use axum::http::StatusCode;
use common::{body_json, check_in, create_event, create_student, option_id, post_json};
use sqlx::PgPool;

/// A student checked in to a fresh event; returns the attendance id.
async fn seed_attendance(pool: &PgPool) -> i64 {
    let student = create_student(pool, "S12345678", None).await;
    let event = create_event(pool, "Networking Night").await;
    check_in(pool, student.id, event.id).await.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_feedback(pool: PgPool) {
    let attendance_id = seed_attendance(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "attendance_id": attendance_id,
        "rating": 5,
        "recommend_score": 9,
        "open_ended": { "best_part": "The speakers" },
    });
    let response = post_json(app, "/api/v1/feedback", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["attendance_id"], attendance_id);
    assert_eq!(json["data"]["rating"], 5);
    assert_eq!(json["data"]["recommend_score"], 9);
    assert_eq!(json["data"]["open_ended"]["best_part"], "The speakers");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_open_ended_defaults_to_empty_object(pool: PgPool) {
    let attendance_id = seed_attendance(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "attendance_id": attendance_id, "rating": 3 });
    let response = post_json(app, "/api/v1/feedback", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["open_ended"], serde_json::json!({}));
    assert!(json["data"]["recommend_score"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_custom_heard_via_folds_into_option(pool: PgPool) {
    let attendance_id = seed_attendance(&pool).await;
    let email_id = option_id(&pool, "heard_via", "Email").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "attendance_id": attendance_id, "custom_heard_via": " email " });
    let response = post_json(app, "/api/v1/feedback", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["heard_via_option_id"], email_id);
    assert!(json["data"]["custom_heard_via"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_feedback_returns_409(pool: PgPool) {
    let attendance_id = seed_attendance(&pool).await;
    let body = serde_json::json!({ "attendance_id": attendance_id, "rating": 4 });

    let app = common::build_test_app(pool.clone());
    let first = post_json(app, "/api/v1/feedback", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_id = body_json(first).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let second = post_json(app, "/api/v1/feedback", body).await;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["error"], "Feedback already submitted for this attendance");
    assert_eq!(json["existing_id"], first_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_scores_are_rejected(pool: PgPool) {
    let attendance_id = seed_attendance(&pool).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "attendance_id": attendance_id, "rating": 6 });
    let response = post_json(app, "/api/v1/feedback", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "attendance_id": attendance_id, "recommend_score": 11 });
    let response = post_json(app, "/api/v1/feedback", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_attendance_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/feedback", serde_json::json!({ "rating": 4 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Attendance ID is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_attendance_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "attendance_id": 424_242, "rating": 4 });
    let response = post_json(app, "/api/v1/feedback", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
