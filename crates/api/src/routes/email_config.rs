//! Route definitions for the `/email-config` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::email_config;
use crate::state::AppState;

/// Routes mounted at `/email-config`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /       -> list_email_configs
/// POST   /       -> create_email_config
/// DELETE /{id}   -> delete_email_config
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(email_config::list_email_configs).post(email_config::create_email_config),
        )
        .route("/{id}", delete(email_config::delete_email_config))
}
