//! Handlers for the `/dashboard` resource.
//!
//! Every figure is computed at request time from the current rows.

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use labstock_core::inventory::EXPIRY_WINDOW_DAYS;
use labstock_db::models::dashboard::{CategoryStat, DashboardStats};
use labstock_db::repositories::{DashboardRepo, InventoryRepo};

use crate::error::AppResult;
use crate::handlers::inventory::{to_responses, InventoryItemResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = DashboardRepo::stats(&state.pool, Utc::now()).await?;
    Ok(Json(stats))
}

/// GET /api/dashboard/category-stats
pub async fn category_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<CategoryStat>>> {
    let stats = DashboardRepo::category_stats(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/dashboard/low-stock-items
///
/// Items at or below their reorder level.
pub async fn low_stock_items(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<InventoryItemResponse>>> {
    let items = InventoryRepo::list_low_stock(&state.pool).await?;
    Ok(Json(to_responses(items)))
}

/// GET /api/dashboard/expiring-items
///
/// Items expiring within the next 30 days. Already expired items are excluded.
pub async fn expiring_items(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<InventoryItemResponse>>> {
    let now = Utc::now();
    let items = InventoryRepo::list_expiring_between(
        &state.pool,
        now,
        now + Duration::days(EXPIRY_WINDOW_DAYS),
    )
    .await?;
    Ok(Json(to_responses(items)))
}
