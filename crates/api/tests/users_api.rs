//! HTTP-level tests for account registration, listing and deletion.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth, seed_and_login};
use sqlx::PgPool;

fn registration(employee_number: &str) -> serde_json::Value {
    serde_json::json!({
        "full_name": "Grace Hopper",
        "employee_number": employee_number,
        "section": "Virology",
        "role": "user",
        "email": "grace@lab.test",
        "password": "compiler-1952",
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_registers_user_who_can_log_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, token) = seed_and_login(&app, &pool, "ADM1", "admin").await;

    let response = post_json_auth(app.clone(), "/api/register", registration("EMP200"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["employee_number"], "EMP200");
    assert_eq!(json["role"], "user");
    assert!(json.get("password_hash").is_none());

    let login = serde_json::json!({ "employee_number": "EMP200", "password": "compiler-1952" });
    let response = post_json(app, "/api/login", login).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_employee_number_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, token) = seed_and_login(&app, &pool, "ADM1", "admin").await;

    let first = post_json_auth(app.clone(), "/api/register", registration("EMP201"), &token).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(app, "/api/register", registration("EMP201"), &token).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn registration_input_is_validated(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, token) = seed_and_login(&app, &pool, "ADM1", "admin").await;

    let mut bad_role = registration("EMP202");
    bad_role["role"] = "superuser".into();
    let mut bad_email = registration("EMP203");
    bad_email["email"] = "not-an-email".into();
    let mut short_password = registration("EMP204");
    short_password["password"] = "short".into();
    let mut blank_name = registration("EMP205");
    blank_name["full_name"] = "  ".into();

    for body in [bad_role, bad_email, short_password, blank_name] {
        let response = post_json_auth(app.clone(), "/api/register", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_admin_cannot_register_or_list(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_user, token) = seed_and_login(&app, &pool, "EMP206", "user").await;

    let response = post_json_auth(app.clone(), "/api/register", registration("EMP207"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_delete_self(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (admin, token) = seed_and_login(&app, &pool, "ADM1", "admin").await;

    let response = delete_auth(app.clone(), &format!("/api/users/{}", admin.id), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, "/api/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&admin.id), "admin must still be listed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_deletes_other_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, token) = seed_and_login(&app, &pool, "ADM1", "admin").await;
    let other = common::seed_user(&pool, "EMP208", "user").await;

    let response = delete_auth(app.clone(), &format!("/api/users/{}", other.id), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/users/{}", other.id), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn users_list_newest_first_without_hashes(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, token) = seed_and_login(&app, &pool, "ADM1", "admin").await;
    common::seed_user(&pool, "EMP209", "user").await;

    let response = get_auth(app, "/api/users", &token).await;
    let json = body_json(response).await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["employee_number"], "EMP209");
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}
