//! HTTP-level integration tests for `/lives` and `/live_registrations`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_live(pool: &PgPool, token: &str, title: &str, starts_at: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = json!({ "title": title, "place": "Shibuya", "starts_at": starts_at });
    let response = post_json_auth(app, "/api/v1/lives", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn register(
    pool: &PgPool,
    token: &str,
    user_id: i64,
    live_id: i64,
) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    let body = json!({ "user_id": user_id, "live_id": live_id });
    post_json_auth(app, "/api/v1/live_registrations", body, token).await
}

// ---------------------------------------------------------------------------
// Lives
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_live_defaults_optional_fields(pool: PgPool) {
    let (organizer, token) = common::create_user(&pool, "organizer").await;
    let app = common::build_test_app(pool);

    let body = json!({ "title": "Summer Show", "starts_at": "2026-08-01T18:00:00Z" });
    let response = post_json_auth(app, "/api/v1/lives", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], organizer.id);
    assert_eq!(json["data"]["title"], "Summer Show");
    assert_eq!(json["data"]["description"], "");
    assert_eq!(json["data"]["place"], "");
    assert_eq!(json["data"]["registration_count"], 0);
    assert_eq!(json["data"]["is_registered"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_live_rejects_blank_title(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "organizer").await;
    let app = common::build_test_app(pool);

    let body = json!({ "title": "  ", "starts_at": "2026-08-01T18:00:00Z" });
    let response = post_json_auth(app, "/api/v1/lives", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_live_rejects_overlong_place_and_description(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "organizer").await;

    for body in [
        json!({ "title": "Show", "place": "p".repeat(201), "starts_at": "2026-08-01T18:00:00Z" }),
        json!({
            "title": "Show",
            "description": "d".repeat(5_001),
            "starts_at": "2026-08-01T18:00:00Z",
        }),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, "/api/v1/lives", body, &token).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_lives_with_non_integer_user_is_parse_error(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "viewer").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/lives?user=abc", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PARSE_ERROR");
    assert_eq!(json["details"]["field"], "user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_lives_orders_by_start_time(pool: PgPool) {
    let (organizer, token) = common::create_user(&pool, "organizer").await;
    let (_, other_token) = common::create_user(&pool, "other").await;
    let later = create_live(&pool, &token, "Later", "2026-12-01T19:00:00Z").await;
    let sooner = create_live(&pool, &token, "Sooner", "2026-11-01T19:00:00Z").await;
    create_live(&pool, &other_token, "Elsewhere", "2026-10-01T19:00:00Z").await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/lives?user={}", organizer.id);
    let response = get_auth(app, &uri, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let lives = json["data"].as_array().unwrap();
    assert_eq!(lives.len(), 2);
    assert_eq!(lives[0]["id"], sooner);
    assert_eq!(lives[1]["id"], later);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_live_organizer_only(pool: PgPool) {
    let (_, organizer_token) = common::create_user(&pool, "organizer").await;
    let (_, other_token) = common::create_user(&pool, "other").await;
    let live_id = create_live(&pool, &organizer_token, "Gig", "2026-12-01T19:00:00Z").await;
    let uri = format!("/api/v1/lives/{live_id}");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "OWNERSHIP_VIOLATION");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &organizer_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &organizer_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_for_live_updates_detail(pool: PgPool) {
    let (_, organizer_token) = common::create_user(&pool, "organizer").await;
    let (fan, fan_token) = common::create_user(&pool, "fan").await;
    let live_id = create_live(&pool, &organizer_token, "Gig", "2026-12-01T19:00:00Z").await;

    let response = register(&pool, &fan_token, fan.id, live_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], fan.id);
    assert_eq!(json["data"]["live_id"], live_id);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/lives/{live_id}"), &fan_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["registration_count"], 1);
    assert_eq!(json["data"]["is_registered"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_registration_is_integrity_error(pool: PgPool) {
    let (_, organizer_token) = common::create_user(&pool, "organizer").await;
    let (fan, fan_token) = common::create_user(&pool, "fan").await;
    let live_id = create_live(&pool, &organizer_token, "Gig", "2026-12-01T19:00:00Z").await;

    let response = register(&pool, &fan_token, fan.id, live_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = register(&pool, &fan_token, fan.id, live_id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTEGRITY_ERROR");
    assert_eq!(json["details"]["fields"], json!(["user", "live"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_another_user_is_rejected(pool: PgPool) {
    let (organizer, organizer_token) = common::create_user(&pool, "organizer").await;
    let (_, fan_token) = common::create_user(&pool, "fan").await;
    let live_id = create_live(&pool, &organizer_token, "Gig", "2026-12-01T19:00:00Z").await;

    let response = register(&pool, &fan_token, organizer.id, live_id).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "OWNERSHIP_VIOLATION");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_for_missing_live_is_validation_error(pool: PgPool) {
    let (fan, fan_token) = common::create_user(&pool, "fan").await;

    let response = register(&pool, &fan_token, fan.id, 999_999).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_registrations_filters(pool: PgPool) {
    let (_, organizer_token) = common::create_user(&pool, "organizer").await;
    let (fan, fan_token) = common::create_user(&pool, "fan").await;
    let first = create_live(&pool, &organizer_token, "One", "2026-11-01T19:00:00Z").await;
    let second = create_live(&pool, &organizer_token, "Two", "2026-12-01T19:00:00Z").await;
    register(&pool, &fan_token, fan.id, first).await;
    register(&pool, &fan_token, fan.id, second).await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/live_registrations?user={}&live={second}", fan.id);
    let json = body_json(get_auth(app, &uri, &fan_token).await).await;
    let registrations = json["data"].as_array().unwrap();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0]["live_id"], second);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/live_registrations?live=x", &fan_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"]["field"], "live");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/live_registrations?live=999999", &fan_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancel_registration_owner_only(pool: PgPool) {
    let (_, organizer_token) = common::create_user(&pool, "organizer").await;
    let (fan, fan_token) = common::create_user(&pool, "fan").await;
    let live_id = create_live(&pool, &organizer_token, "Gig", "2026-12-01T19:00:00Z").await;
    let response = register(&pool, &fan_token, fan.id, live_id).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/live_registrations/{id}");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &organizer_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &uri, &fan_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
