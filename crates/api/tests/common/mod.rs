#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use labstock_api::auth::jwt::JwtConfig;
use labstock_api::auth::password::hash_password;
use labstock_api::bootstrap::BootstrapConfig;
use labstock_api::config::ServerConfig;
use labstock_api::router::build_app_router;
use labstock_api::state::AppState;
use labstock_core::types::Timestamp;
use labstock_db::models::inventory::{CreateInventoryItem, InventoryItem};
use labstock_db::models::user::{CreateUser, User};
use labstock_db::repositories::{InventoryRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Plaintext password given to every seeded user.
pub const TEST_PASSWORD: &str = "correct-horse-42";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-entropy".to_string(),
            access_token_expiry_mins: 60,
        },
        bootstrap: BootstrapConfig::disabled(),
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Insert a user directly with [`TEST_PASSWORD`].
pub async fn seed_user(pool: &PgPool, employee_number: &str, role: &str) -> User {
    let input = CreateUser {
        employee_number: employee_number.to_string(),
        full_name: format!("Tester {employee_number}"),
        section: "Microbiology".to_string(),
        role: role.to_string(),
        email: format!("{}@lab.test", employee_number.to_lowercase()),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Insert an inventory item directly.
pub async fn seed_item(
    pool: &PgPool,
    name: &str,
    quantity: i32,
    reorder_level: i32,
    validity: Option<Timestamp>,
) -> InventoryItem {
    let input = CreateInventoryItem {
        item_name: name.to_string(),
        category: "Reagents".to_string(),
        sub_category: None,
        location: "Shelf A".to_string(),
        manufacturer: "Acme".to_string(),
        supplier: "LabSupply".to_string(),
        model: "Std".to_string(),
        uom: "bottle".to_string(),
        catalogue_no: format!("CAT-{name}"),
        quantity,
        target_stock_level: reorder_level * 2,
        reorder_level,
        validity,
        use_case: "Routine assays".to_string(),
        added_by: "ADMIN001".to_string(),
    };
    InventoryRepo::create(pool, &input)
        .await
        .expect("item creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: &Router, employee_number: &str) -> String {
    let body = serde_json::json!({
        "employee_number": employee_number,
        "password": TEST_PASSWORD,
    });
    let response = post_json(app.clone(), "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

/// Seed a user with `role` and return a bearer token for them.
pub async fn seed_and_login(
    app: &Router,
    pool: &PgPool,
    employee_number: &str,
    role: &str,
) -> (User, String) {
    let user = seed_user(pool, employee_number, role).await;
    let token = login(app, employee_number).await;
    (user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_auth(app, "POST", uri, body, token).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_auth(app, "PUT", uri, body, token).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_auth(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
