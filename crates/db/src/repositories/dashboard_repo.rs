//! Read-only dashboard aggregates over `inventory_items` and
//! `withdrawal_requests`.
//!
//! The predicates here match `labstock_core::inventory::classify`.

use chrono::Duration;
use labstock_core::inventory::EXPIRY_WINDOW_DAYS;
use labstock_core::types::Timestamp;
use labstock_core::withdrawal::STATUS_PENDING;
use sqlx::PgPool;

use crate::models::dashboard::{CategoryStat, DashboardStats};

/// Computes dashboard aggregates at query time. Nothing is cached.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Inventory and request counts as of `now`.
    pub async fn stats(pool: &PgPool, now: Timestamp) -> Result<DashboardStats, sqlx::Error> {
        let horizon = now + Duration::days(EXPIRY_WINDOW_DAYS);
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                COUNT(*) AS total_items,
                COUNT(*) FILTER (WHERE quantity <= reorder_level) AS low_stock_items,
                COUNT(*) FILTER (WHERE quantity = 0) AS zero_stock_items,
                COUNT(*) FILTER (WHERE validity < $1) AS expired_items,
                COUNT(*) FILTER (WHERE validity >= $1 AND validity <= $2) AS expiring_soon,
                (SELECT COUNT(*) FROM withdrawal_requests WHERE status = $3) AS pending_requests
             FROM inventory_items",
        )
        .bind(now)
        .bind(horizon)
        .bind(STATUS_PENDING)
        .fetch_one(pool)
        .await
    }

    /// Item count and summed quantity per category, ordered by category.
    pub async fn category_stats(pool: &PgPool) -> Result<Vec<CategoryStat>, sqlx::Error> {
        sqlx::query_as::<_, CategoryStat>(
            "SELECT
                category,
                COUNT(*) AS item_count,
                COALESCE(SUM(quantity), 0)::BIGINT AS quantity_sum
             FROM inventory_items
             GROUP BY category
             ORDER BY category ASC",
        )
        .fetch_all(pool)
        .await
    }
}
