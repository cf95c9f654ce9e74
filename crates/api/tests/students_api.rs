//! Integration tests for the staff student directory.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, check_in, create_admin, create_event, create_student, get_auth, staff_token,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_directory_counts_attendance(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let regular = create_student(&pool, "S00000002", Some("reg@uni.edu")).await;
    create_student(&pool, "S00000001", None).await;
    let first = create_event(&pool, "First").await;
    let second = create_event(&pool, "Second").await;
    check_in(&pool, regular.id, first.id).await;
    check_in(&pool, regular.id, second.id).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/students", &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let students = json["data"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["student_number"], "S00000001");
    assert_eq!(students[0]["attendance_count"], 0);
    assert!(students[0]["last_attended_at"].is_null());
    assert_eq!(students[1]["attendance_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_directory_search(pool: PgPool) {
    let admin = create_admin(&pool).await;
    create_student(&pool, "S00000001", Some("alex@uni.edu")).await;
    create_student(&pool, "S00000002", Some("sam@uni.edu")).await;
    let app = common::build_test_app(pool);

    let response =
        get_auth(app, "/api/v1/admin/students?search=ALEX", &staff_token(&admin)).await;

    let json = body_json(response).await;
    let students = json["data"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["email"], "alex@uni.edu");
}
