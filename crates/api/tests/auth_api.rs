//! HTTP-level tests for login, self-registration and `/users`.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_user, delete_auth, get_auth, post_json, post_json_auth,
    token_for, TEST_PASSWORD,
};
use parish_core::roles::Role;
use parish_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_user(&pool, "pastor@parish.test", Role::Pastor).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "pastor@parish.test", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 86_400);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "PASTOR");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password_is_401(pool: PgPool) {
    create_user(&pool, "staff@parish.test", Role::Staff).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "staff@parish.test", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "nobody@parish.test", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_deactivated_is_403(pool: PgPool) {
    let user = create_user(&pool, "former@parish.test", Role::Staff).await;
    UserRepo::deactivate(&pool, user.id).await.unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "former@parish.test", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_creates_pending_member(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "Newcomer@Parish.Test",
            "password": "welcome-home",
            "first_name": "Ruth",
            "last_name": "Moab",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["member"]["status"], "PENDING_APPROVAL");
    assert_eq!(json["data"]["member"]["email"], "newcomer@parish.test");
    assert_eq!(json["data"]["user"]["role"], "MEMBER");
    assert_eq!(
        json["data"]["user"]["member_id"],
        json["data"]["member"]["id"]
    );

    // The new login works straight away.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "newcomer@parish.test", "password": "welcome-home" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_is_409(pool: PgPool) {
    create_user(&pool, "taken@parish.test", Role::Member).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "taken@parish.test",
            "password": "welcome-home",
            "first_name": "Naomi",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_short_password_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "short@parish.test",
            "password": "abc",
            "first_name": "Boaz",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_current_user(pool: PgPool) {
    let user = create_user(&pool, "me@parish.test", Role::Member).await;
    let token = token_for(&user, Role::Member);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@parish.test");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_creates_and_deactivates_user(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        json!({ "email": "clerk@parish.test", "password": "clerk-password", "role": "STAFF" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["role"], "STAFF");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/users/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(!user.is_active);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_cannot_deactivate_self(pool: PgPool) {
    let admin = create_user(&pool, "solo@parish.test", Role::Admin).await;
    let token = token_for(&admin, Role::Admin);
    let app = common::build_test_app(pool);

    let response = delete_auth(app, &format!("/api/v1/users/{}", admin.id), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
