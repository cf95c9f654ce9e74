//! Integration tests for form field option management.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{
    body_json, create_admin, create_event_at, delete_auth, event_input, get, get_auth,
    option_id, post_json_auth, put_json_auth, staff_token,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_is_active_and_ordered(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let social = option_id(&pool, "event_type", "Social").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "is_active": false });
    let uri = format!("/api/v1/admin/field-options/{social}");
    let response = put_json_auth(app, &uri, body, &staff_token(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/field-options/event_type").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let values: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, ["Workshop", "Seminar", "Career Fair", "Info Session"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/field-options/colour").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_list_includes_inactive_on_request(pool: PgPool) {
    let admin = create_admin(&pool).await;
    sqlx::query("UPDATE field_options SET is_active = false WHERE value = 'Flyer'")
        .execute(&pool)
        .await
        .unwrap();
    let token = staff_token(&admin);

    let app = common::build_test_app(pool.clone());
    let uri = "/api/v1/admin/field-options?field_name=heard_via";
    let response = get_auth(app, uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 4);

    let app = common::build_test_app(pool);
    let uri = "/api/v1/admin/field-options?field_name=heard_via&include_inactive=true";
    let response = get_auth(app, uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_option_appends_to_field(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "field_name": "location", "value": "  Rooftop " });
    let response =
        post_json_auth(app, "/api/v1/admin/field-options", body, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"], "Rooftop");
    assert_eq!(json["data"]["sort_order"], 6);
    assert_eq!(json["data"]["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_option_returns_409(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "field_name": "heard_via", "value": "Email" });
    let response =
        post_json_auth(app, "/api/v1/admin/field-options", body, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unused_option(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let flyer = option_id(&pool, "heard_via", "Flyer").await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/admin/field-options/{flyer}");
    let response = delete_auth(app, &uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_option_in_use_returns_409(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let workshop = option_id(&pool, "event_type", "Workshop").await;
    let mut input = event_input("Typed Event", Utc::now());
    input.type_option_id = Some(workshop);
    create_event_at(&pool, input).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/admin/field-options/{workshop}");
    let response = delete_auth(app, &uri, &staff_token(&admin)).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Option is in use; deactivate it instead");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_options(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let morning = option_id(&pool, "time", "Morning (9-12)").await;
    let afternoon = option_id(&pool, "time", "Afternoon (1-5)").await;
    let evening = option_id(&pool, "time", "Evening (6-9)").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "field_name": "time", "ids": [evening, morning, afternoon] });
    let response =
        put_json_auth(app, "/api/v1/admin/field-options/reorder", body, &staff_token(&admin))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [evening, morning, afternoon]);
}
