//! Member directory, approval and household placement over HTTP.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, staff_token};
use parish_core::member::MEMBER_APPROVED;
use parish_events::EventBus;
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_member(pool: &PgPool, token: &str, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/admin/members", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn create_family(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/admin/families", json!({ "name": name }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_house(pool: &PgPool, token: &str, family_id: i64, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/admin/houses",
        json!({ "family_id": family_id, "name": name }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_directory_search_and_pagination(pool: PgPool) {
    let token = staff_token(&pool).await;
    for (first, last) in [("Joseph", "Kurian"), ("Mary", "Kurian"), ("Thomas", "Varghese")] {
        create_member(
            &pool,
            &token,
            json!({ "first_name": first, "last_name": last, "status": "ACTIVE" }),
        )
        .await;
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        "/api/v1/admin/members?search=kurian&sort_by=first_name&sort_order=asc&limit=1",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["page"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["first_name"], "Joseph");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        "/api/v1/admin/members?page=922337203685477580&limit=100",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/members?sort_by=password_hash", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_filter(pool: PgPool) {
    let token = staff_token(&pool).await;
    create_member(&pool, &token, json!({ "first_name": "Anna" })).await;
    create_member(&pool, &token, json!({ "first_name": "Simeon", "status": "ACTIVE" })).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/admin/members?status=PENDING_APPROVAL",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["first_name"], "Anna");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_pending_member_once(pool: PgPool) {
    let token = staff_token(&pool).await;
    let member = create_member(&pool, &token, json!({ "first_name": "Lydia" })).await;
    assert_eq!(member["status"], "PENDING_APPROVAL");
    let id = member["id"].as_i64().unwrap();

    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();

    let app = common::build_test_app_with_bus(pool.clone(), Arc::clone(&bus));
    let response =
        post_json_auth(app, &format!("/api/v1/admin/members/{id}/approve"), json!({}), &token)
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "ACTIVE");

    let event = rx.recv().await.unwrap();
    assert_eq!(event.event_type, MEMBER_APPROVED);
    assert_eq!(event.source_entity_id, Some(id));

    let app = common::build_test_app_with_bus(pool, bus);
    let response =
        post_json_auth(app, &format!("/api/v1/admin/members/{id}/approve"), json!({}), &token)
            .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_back_to_pending_is_409(pool: PgPool) {
    let token = staff_token(&pool).await;
    let member =
        create_member(&pool, &token, json!({ "first_name": "Tabitha", "status": "ACTIVE" })).await;
    let id = member["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/members/{id}/status"),
        json!({ "status": "PENDING_APPROVAL" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_house_from_other_family_is_rejected(pool: PgPool) {
    let token = staff_token(&pool).await;
    let ours = create_family(&pool, &token, "Kurian").await;
    let theirs = create_family(&pool, &token, "Varghese").await;
    let their_house = create_house(&pool, &token, theirs, "Main house").await;
    let member = create_member(&pool, &token, json!({ "first_name": "Joseph" })).await;
    let id = member["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/members/{id}/family"),
        json!({ "family_id": ours, "house_id": their_house }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Placement is unchanged after the rejected request.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/admin/members/{id}"), &token).await;
    let json = body_json(response).await;
    assert!(json["data"]["family_id"].is_null());
    assert!(json["data"]["house_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_family_tree_groups_members_by_house(pool: PgPool) {
    let token = staff_token(&pool).await;
    let family = create_family(&pool, &token, "Kurian").await;
    let house = create_house(&pool, &token, family, "Kurian Villa").await;

    let father = create_member(&pool, &token, json!({ "first_name": "Joseph" })).await;
    let son = create_member(&pool, &token, json!({ "first_name": "Jacob" })).await;
    let father_id = father["id"].as_i64().unwrap();
    let son_id = son["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/members/{father_id}/family"),
        json!({ "family_id": family, "house_id": house, "family_role": "HEAD" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["head_of_family"], true);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/members/{son_id}/family"),
        json!({ "family_id": family, "family_role": "SON" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response =
        get_auth(app, &format!("/api/v1/admin/families/{family}/tree"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let tree = body_json(response).await["data"].clone();
    assert_eq!(tree["houses"][0]["house"]["id"], house);
    assert_eq!(tree["houses"][0]["members"][0]["id"], father_id);
    assert_eq!(tree["unhoused_members"][0]["id"], son_id);

    // Removing the son clears his placement but keeps the member.
    let app = common::build_test_app(pool.clone());
    let response =
        delete_auth(app, &format!("/api/v1/admin/members/{son_id}/family"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["family_id"].is_null());
    assert!(json["data"]["family_role"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_related_families_link_and_unlink(pool: PgPool) {
    let token = staff_token(&pool).await;
    let a = create_family(&pool, &token, "Kurian").await;
    let b = create_family(&pool, &token, "Kurian (Kottayam)").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/families/{a}/related"),
        json!({ "related_family_id": b }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Relations read the same from both sides.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/admin/families/{b}/related"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], a);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/families/{a}/related"),
        json!({ "related_family_id": a }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response =
        delete_auth(app, &format!("/api/v1/admin/families/{b}/related/{a}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/admin/families/{a}/related"), &token).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}
