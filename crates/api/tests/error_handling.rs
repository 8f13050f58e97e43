//! Tests for `AppError` -> HTTP response mapping.
//!
//! Most call `IntoResponse` directly on `AppError` values; the extractor
//! rejection tests at the bottom go through the full router.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use labstock_api::error::AppError;
use labstock_core::error::CoreError;
use sqlx::PgPool;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "InventoryItem",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "InventoryItem with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("quantity must not be negative".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "quantity must not be negative");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Cannot delete your own account".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict(
        "Insufficient stock. Available: 2, Requested: 5".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn invalid_state_error_returns_409_with_own_code() {
    let err = AppError::Core(CoreError::InvalidState("Request already processed".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_STATE");
}

#[tokio::test]
async fn unauthorized_and_forbidden_map_to_401_and_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("admins only".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) =
        error_to_response(AppError::InternalError("zip writer exploded".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Internal("secret detail".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

/// Assert a response is a structured `400 VALIDATION_ERROR` body.
async fn assert_validation_body(response: axum::response::Response) -> String {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    json["error"].as_str().expect("error message").to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_json_field_returns_structured_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_user, token) = common::seed_and_login(&app, &pool, "EMP900", "user").await;

    let response = common::post_json_auth(
        app,
        "/api/withdrawal-requests",
        serde_json::json!({ "item_id": 1, "requested_quantity": 1 }),
        &token,
    )
    .await;
    let message = assert_validation_body(response).await;
    assert!(message.contains("purpose"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrongly_typed_json_field_returns_structured_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_user, token) = common::seed_and_login(&app, &pool, "EMP901", "user").await;

    let response = common::post_json_auth(
        app,
        "/api/withdrawal-requests",
        serde_json::json!({ "item_id": 1, "requested_quantity": "3", "purpose": "PCR" }),
        &token,
    )
    .await;
    assert_validation_body(response).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unparsable_path_id_returns_structured_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_user, token) = common::seed_and_login(&app, &pool, "EMP902", "user").await;

    let response = common::get_auth(app, "/api/inventory/abc", &token).await;
    assert_validation_body(response).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_login_body_returns_structured_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app,
        "/api/login",
        serde_json::json!({ "employee_number": "EMP903" }),
    )
    .await;
    assert_validation_body(response).await;
}
