//! Route definitions for login and profile.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes merged at the `/api` root.
///
/// ```text
/// POST /login    -> login
/// GET  /profile  -> profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/profile", get(auth::profile))
}
