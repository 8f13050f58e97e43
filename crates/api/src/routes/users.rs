//! Route definitions for account management.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes merged at the `/api` root.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// POST   /register    -> register
/// GET    /users       -> list_users
/// DELETE /users/{id}  -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/users", get(users::list_users))
        .route("/users/{id}", delete(users::delete_user))
}
