//! HTTP-level tests for stock-alert recipient management.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, seed_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_adds_lists_and_removes_recipients(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (admin, token) = seed_and_login(&app, &pool, "ADM1", "admin").await;

    let body = serde_json::json!({ "email": "stores@lab.test" });
    let response = post_json_auth(app.clone(), "/api/email-config", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["email"], "stores@lab.test");
    assert_eq!(created["is_active"], true);
    assert_eq!(created["added_by"], admin.employee_number);

    let response = get_auth(app.clone(), "/api/email-config", &token).await;
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let id = created["id"].as_i64().unwrap();
    let response = delete_auth(app.clone(), &format!("/api/email-config/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/email-config/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_email_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, token) = seed_and_login(&app, &pool, "ADM1", "admin").await;

    let body = serde_json::json!({ "email": "stores-at-lab" });
    let response = post_json_auth(app, "/api/email-config", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn users_cannot_manage_recipients(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_user, token) = seed_and_login(&app, &pool, "EMP300", "user").await;

    let response = get_auth(app.clone(), "/api/email-config", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = serde_json::json!({ "email": "stores@lab.test" });
    let response = post_json_auth(app, "/api/email-config", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
