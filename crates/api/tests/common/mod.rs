#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use parish_api::auth::jwt::{generate_access_token, JwtConfig};
use parish_api::auth::password::hash_password;
use parish_api::config::{ServerConfig, UploadConfig};
use parish_api::router::build_app_router;
use parish_api::state::AppState;
use parish_core::roles::Role;
use parish_db::models::user::{CreateUser, User};
use parish_db::repositories::UserRepo;
use parish_events::EventBus;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads go to a fresh directory under the system temp dir so parallel
/// tests never see each other's files.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        jwt: test_jwt_config(),
        upload: UploadConfig {
            dir: upload_dir(),
            max_bytes: 1024 * 1024,
            public_base_url: String::new(),
        },
        push_gateway_url: None,
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiry_days: 1,
    }
}

fn upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("parish-uploads-{}", uuid::Uuid::new_v4()))
}

/// Build the full application router on top of `pool`, using the same
/// middleware stack as production.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool, Arc::new(EventBus::default()))
}

/// Same as [`build_test_app`], but lets the test subscribe to the bus.
pub fn build_test_app_with_bus(pool: PgPool, event_bus: Arc<EventBus>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert an active user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, role: Role) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
            role,
            member_id: None,
        },
    )
    .await
    .expect("user creation should succeed")
}

pub fn token_for(user: &User, role: Role) -> String {
    generate_access_token(user.id, role, &test_jwt_config()).expect("token should sign")
}

/// Create a user with `role` and return a bearer token for it.
pub async fn token_with_role(pool: &PgPool, email: &str, role: Role) -> String {
    let user = create_user(pool, email, role).await;
    token_for(&user, role)
}

pub async fn admin_token(pool: &PgPool) -> String {
    token_with_role(pool, "admin@parish.test", Role::Admin).await
}

pub async fn staff_token(pool: &PgPool) -> String {
    token_with_role(pool, "staff@parish.test", Role::Staff).await
}

pub async fn member_token(pool: &PgPool) -> String {
    token_with_role(pool, "member@parish.test", Role::Member).await
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, &body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), &body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), &body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// Send a multipart body with a single `file` part.
pub async fn upload_auth(
    app: Router,
    uri: &str,
    file_name: &str,
    bytes: &[u8],
    token: &str,
) -> Response<Body> {
    let boundary = "parish-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .expect("request should build");
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
