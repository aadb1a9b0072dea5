//! HTTP-level integration tests for the `/posts` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn create_post(pool: &PgPool, token: &str, content: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/posts", json!({ "content": content }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_post_sets_author_from_token(pool: PgPool) {
    let (author, token) = common::create_user(&pool, "author").await;
    let app = common::build_test_app(pool);

    let body = json!({ "content": "first!" });
    let response = post_json_auth(app, "/api/v1/posts", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], author.id);
    assert_eq!(json["data"]["content"], "first!");
    assert_eq!(json["data"]["good_count"], 0);
    assert_eq!(json["data"]["is_good"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_post_rejects_blank_and_oversized_content(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "author").await;

    for content in ["   ".to_string(), "x".repeat(1001)] {
        let app = common::build_test_app(pool.clone());
        let response =
            post_json_auth(app, "/api/v1/posts", json!({ "content": content }), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_posts_newest_first_with_user_filter(pool: PgPool) {
    let (alice, alice_token) = common::create_user(&pool, "alice").await;
    let (_, bob_token) = common::create_user(&pool, "bob").await;
    let older = create_post(&pool, &alice_token, "older").await;
    let newer = create_post(&pool, &alice_token, "newer").await;
    create_post(&pool, &bob_token, "bob's").await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/posts?user={}", alice.id);
    let response = get_auth(app, &uri, &bob_token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let posts = json["data"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["id"], newer);
    assert_eq!(posts[1]["id"], older);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/posts?user=alice", &bob_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"]["field"], "user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_post_detail_reflects_viewer_goods(pool: PgPool) {
    let (_, author_token) = common::create_user(&pool, "author").await;
    let (fan, fan_token) = common::create_user(&pool, "fan").await;
    let post_id = create_post(&pool, &author_token, "like me").await;

    let app = common::build_test_app(pool.clone());
    let body = json!({ "user_id": fan.id, "post_id": post_id });
    let response = post_json_auth(app, "/api/v1/goods", body, &fan_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/v1/posts/{post_id}");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &uri, &fan_token).await).await;
    assert_eq!(json["data"]["good_count"], 1);
    assert_eq!(json["data"]["is_good"], true);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &uri, &author_token).await).await;
    assert_eq!(json["data"]["good_count"], 1);
    assert_eq!(json["data"]["is_good"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_post_author_only_and_cascades_goods(pool: PgPool) {
    let (_, author_token) = common::create_user(&pool, "author").await;
    let (fan, fan_token) = common::create_user(&pool, "fan").await;
    let post_id = create_post(&pool, &author_token, "doomed").await;

    let app = common::build_test_app(pool.clone());
    let body = json!({ "user_id": fan.id, "post_id": post_id });
    let response = post_json_auth(app, "/api/v1/goods", body, &fan_token).await;
    let good_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/posts/{post_id}");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &fan_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &author_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/goods/{good_id}"), &fan_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_posts_with_non_integer_user_is_parse_error(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "viewer").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/posts?user=me", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PARSE_ERROR");
    assert_eq!(json["details"]["field"], "user");
    assert_eq!(json["details"]["value"], "me");
}
