//! Dashboard aggregate rows.

use serde::Serialize;
use sqlx::FromRow;

/// Inventory and request counts for the dashboard header cards.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_items: i64,
    pub low_stock_items: i64,
    pub zero_stock_items: i64,
    pub expired_items: i64,
    pub expiring_soon: i64,
    pub pending_requests: i64,
}

/// Item count and summed quantity for one category.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct CategoryStat {
    pub category: String,
    pub item_count: i64,
    pub quantity_sum: i64,
}
