//! Route definitions for the `/withdrawal-requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::withdrawal;
use crate::state::AppState;

/// Routes mounted at `/withdrawal-requests`.
///
/// ```text
/// GET  /          -> list_requests
/// POST /          -> create_request
/// POST /process   -> process_request (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(withdrawal::list_requests).post(withdrawal::create_request),
        )
        .route("/process", post(withdrawal::process_request))
}
