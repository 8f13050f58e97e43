//! Repository for the `inventory_items` table.

use labstock_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::inventory::{CreateInventoryItem, InventoryItem, UpdateInventoryItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, item_name, category, sub_category, location, manufacturer, \
                       supplier, model, uom, catalogue_no, quantity, target_stock_level, \
                       reorder_level, validity, use_case, added_by, created_at, updated_at";

/// Provides CRUD operations for inventory items.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Insert a new item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInventoryItem,
    ) -> Result<InventoryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO inventory_items
                (item_name, category, sub_category, location, manufacturer, supplier, model,
                 uom, catalogue_no, quantity, target_stock_level, reorder_level, validity,
                 use_case, added_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(&input.item_name)
            .bind(&input.category)
            .bind(&input.sub_category)
            .bind(&input.location)
            .bind(&input.manufacturer)
            .bind(&input.supplier)
            .bind(&input.model)
            .bind(&input.uom)
            .bind(&input.catalogue_no)
            .bind(input.quantity)
            .bind(input.target_stock_level)
            .bind(input.reorder_level)
            .bind(input.validity)
            .bind(&input.use_case)
            .bind(&input.added_by)
            .fetch_one(pool)
            .await
    }

    /// Find an item by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_items WHERE id = $1");
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all items ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory_items ORDER BY item_name ASC, id ASC");
        sqlx::query_as::<_, InventoryItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Items at or below their reorder level, lowest stock first.
    pub async fn list_low_stock(pool: &PgPool) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inventory_items
             WHERE quantity <= reorder_level
             ORDER BY quantity ASC, item_name ASC"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Items whose validity falls within `[from, until]`, soonest first.
    pub async fn list_expiring_between(
        pool: &PgPool,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inventory_items
             WHERE validity >= $1 AND validity <= $2
             ORDER BY validity ASC, item_name ASC"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(from)
            .bind(until)
            .fetch_all(pool)
            .await
    }

    /// Update an item. Only non-`None` fields in `input` are applied.
    ///
    /// `sub_category` and `validity` are cleared when given as `Some(None)`.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInventoryItem,
    ) -> Result<Option<InventoryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE inventory_items SET
                item_name = COALESCE($2, item_name),
                category = COALESCE($3, category),
                sub_category = CASE WHEN $4 THEN $5 ELSE sub_category END,
                location = COALESCE($6, location),
                manufacturer = COALESCE($7, manufacturer),
                supplier = COALESCE($8, supplier),
                model = COALESCE($9, model),
                uom = COALESCE($10, uom),
                catalogue_no = COALESCE($11, catalogue_no),
                quantity = COALESCE($12, quantity),
                target_stock_level = COALESCE($13, target_stock_level),
                reorder_level = COALESCE($14, reorder_level),
                validity = CASE WHEN $15 THEN $16 ELSE validity END,
                use_case = COALESCE($17, use_case),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(id)
            .bind(&input.item_name)
            .bind(&input.category)
            .bind(input.sub_category.is_some())
            .bind(input.sub_category.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.location)
            .bind(&input.manufacturer)
            .bind(&input.supplier)
            .bind(&input.model)
            .bind(&input.uom)
            .bind(&input.catalogue_no)
            .bind(input.quantity)
            .bind(input.target_stock_level)
            .bind(input.reorder_level)
            .bind(input.validity.is_some())
            .bind(input.validity.flatten())
            .bind(&input.use_case)
            .fetch_optional(pool)
            .await
    }
}
