//! Inventory item entity model and DTOs.

use labstock_core::inventory::{classify, StockFlags, StockLevels};
use labstock_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `inventory_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryItem {
    pub id: DbId,
    pub item_name: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub location: String,
    pub manufacturer: String,
    pub supplier: String,
    pub model: String,
    /// Unit of measurement.
    pub uom: String,
    pub catalogue_no: String,
    pub quantity: i32,
    pub target_stock_level: i32,
    pub reorder_level: i32,
    /// Expiry date, if the item has one.
    pub validity: Option<Timestamp>,
    pub use_case: String,
    /// Employee number of the admin who created the item.
    pub added_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InventoryItem {
    pub fn stock_levels(&self) -> StockLevels {
        StockLevels {
            quantity: self.quantity,
            reorder_level: self.reorder_level,
            target_stock_level: self.target_stock_level,
            validity: self.validity,
        }
    }

    /// Classify this item's stock at `now`.
    pub fn flags(&self, now: Timestamp) -> StockFlags {
        classify(&self.stock_levels(), now)
    }
}

/// DTO for inserting a new item. Counts are already validated.
#[derive(Debug, Clone)]
pub struct CreateInventoryItem {
    pub item_name: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub location: String,
    pub manufacturer: String,
    pub supplier: String,
    pub model: String,
    pub uom: String,
    pub catalogue_no: String,
    pub quantity: i32,
    pub target_stock_level: i32,
    pub reorder_level: i32,
    pub validity: Option<Timestamp>,
    pub use_case: String,
    pub added_by: String,
}

/// DTO for patching an item. `None` leaves the column unchanged.
///
/// `sub_category` and `validity` are nullable columns, so they use
/// `Option<Option<_>>`: `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct UpdateInventoryItem {
    pub item_name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<Option<String>>,
    pub location: Option<String>,
    pub manufacturer: Option<String>,
    pub supplier: Option<String>,
    pub model: Option<String>,
    pub uom: Option<String>,
    pub catalogue_no: Option<String>,
    pub quantity: Option<i32>,
    pub target_stock_level: Option<i32>,
    pub reorder_level: Option<i32>,
    pub validity: Option<Option<Timestamp>>,
    pub use_case: Option<String>,
}
