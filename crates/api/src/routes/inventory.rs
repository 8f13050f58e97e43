//! Route definitions for the `/inventory` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/inventory`.
///
/// ```text
/// GET  /               -> list_items
/// POST /               -> create_item (admin)
/// GET  /{id}           -> get_item
/// PUT  /{id}           -> update_item (admin)
/// GET  /export/excel   -> export_excel (?filter=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::list_items).post(inventory::create_item))
        .route("/{id}", get(inventory::get_item).put(inventory::update_item))
        .route("/export/excel", get(inventory::export_excel))
}
