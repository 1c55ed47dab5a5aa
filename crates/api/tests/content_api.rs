//! Uploads, gallery albums and content blocks.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, member_token, post_json_auth, put_json_auth,
    staff_token, upload_auth,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_is_served_back(pool: PgPool) {
    let token = member_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = upload_auth(
        app.clone(),
        "/api/v1/common/upload",
        "Photo.PNG",
        b"\x89PNG fake image bytes",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let url = body_json(response).await["url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(url.starts_with("/uploads/"), "{url}");
    assert!(url.ends_with(".png"), "{url}");

    let response = get(app, &url).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_rejects_unknown_extension(pool: PgPool) {
    let token = member_token(&pool).await;
    let app = common::build_test_app(pool);

    let response =
        upload_auth(app, "/api/v1/common/upload", "script.exe", b"MZ", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_album_links_uploaded_images(pool: PgPool) {
    let token = staff_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/admin/gallery/albums",
        json!({ "title": "First Communion 2026" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let album = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/gallery/albums/{album}/images"),
        json!({ "urls": ["/uploads/a.png", "/uploads/b.png"] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/admin/gallery/albums/{album}/images"),
        &token,
    )
    .await;
    let images = body_json(response).await["data"].clone();
    assert_eq!(images[0]["url"], "/uploads/a.png");
    let image_id = images[0]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/admin/gallery/images/{image_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/gallery/albums/{album}/images"),
        json!({ "urls": ["  "] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_content_block_upsert_and_delete(pool: PgPool) {
    let token = staff_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/admin/content/about-us",
        json!({ "title": "About us", "body": "Founded in 1904." }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/admin/content/about-us",
        json!({ "title": "About us", "body": "Founded in 1904, rebuilt in 1961." }),
        &token,
    )
    .await;
    assert_eq!(
        body_json(response).await["data"]["body"],
        "Founded in 1904, rebuilt in 1961."
    );

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/admin/content/about-us", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/content/about-us", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
