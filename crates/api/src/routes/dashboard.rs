//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /stats             -> stats
/// GET /category-stats    -> category_stats
/// GET /low-stock-items   -> low_stock_items
/// GET /expiring-items    -> expiring_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/category-stats", get(dashboard::category_stats))
        .route("/low-stock-items", get(dashboard::low_stock_items))
        .route("/expiring-items", get(dashboard::expiring_items))
}
