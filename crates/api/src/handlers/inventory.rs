//! Handlers for the `/inventory` resource.
//!
//! Reads are open to any authenticated user; create and update require the
//! `admin` role. Items are never deleted through the API.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use labstock_core::error::CoreError;
use labstock_core::inventory::{
    parse_validity, validate_required_text, validate_text_length, ExportFilter, StockInput,
};
use labstock_core::types::{DbId, Timestamp};
use labstock_db::models::inventory::{CreateInventoryItem, InventoryItem, UpdateInventoryItem};
use labstock_db::repositories::InventoryRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::export::{build_inventory_export, XLSX_CONTENT_TYPE};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /inventory`.
///
/// Stock counts accept numbers or numeric strings.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub item_name: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub location: String,
    pub manufacturer: String,
    pub supplier: String,
    pub model: String,
    pub uom: String,
    pub catalogue_no: String,
    pub quantity: StockInput,
    pub target_stock_level: StockInput,
    pub reorder_level: StockInput,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub validity: Option<String>,
    pub use_case: String,
}

/// Request body for `PUT /inventory/{id}`. Absent fields are left unchanged.
///
/// `sub_category` and `validity` distinguish absent from `null`: an explicit
/// `null` or blank string clears the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub item_name: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub sub_category: Option<Option<String>>,
    pub location: Option<String>,
    pub manufacturer: Option<String>,
    pub supplier: Option<String>,
    pub model: Option<String>,
    pub uom: Option<String>,
    pub catalogue_no: Option<String>,
    pub quantity: Option<StockInput>,
    pub target_stock_level: Option<StockInput>,
    pub reorder_level: Option<StockInput>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub validity: Option<Option<String>>,
    pub use_case: Option<String>,
}

/// Map a present field to `Some`, so `null` becomes `Some(None)` while an
/// absent field falls back to `None` via `#[serde(default)]`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Query parameters for `GET /inventory/export/excel`.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub filter: Option<String>,
}

/// An inventory item with its stock classification at response time.
#[derive(Debug, Serialize)]
pub struct InventoryItemResponse {
    #[serde(flatten)]
    pub item: InventoryItem,
    /// Primary status label, e.g. `"Low Stock"`.
    pub status: &'static str,
    /// All applicable stock tags, most severe first.
    pub tags: Vec<&'static str>,
}

impl InventoryItemResponse {
    pub fn new(item: InventoryItem, now: Timestamp) -> Self {
        let flags = item.flags(now);
        Self {
            status: flags.primary_status().label(),
            tags: flags.tags(),
            item,
        }
    }
}

/// Classify a batch of items against a single `now`.
pub fn to_responses(items: Vec<InventoryItem>) -> Vec<InventoryItemResponse> {
    let now = Utc::now();
    items
        .into_iter()
        .map(|item| InventoryItemResponse::new(item, now))
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/inventory
///
/// All items ordered by name.
pub async fn list_items(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<InventoryItemResponse>>> {
    let items = InventoryRepo::list(&state.pool).await?;
    Ok(Json(to_responses(items)))
}

/// GET /api/inventory/{id}
pub async fn get_item(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<InventoryItemResponse>> {
    let item = InventoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InventoryItem",
            id,
        }))?;

    Ok(Json(InventoryItemResponse::new(item, Utc::now())))
}

/// POST /api/inventory
///
/// Create an item. `added_by` is taken from the caller.
pub async fn create_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<InventoryItemResponse>)> {
    let create_dto = validate_create(input, &admin.employee_number)?;
    let item = InventoryRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        item_id = item.id,
        item_name = %item.item_name,
        quantity = item.quantity,
        added_by = %item.added_by,
        "Inventory item created"
    );

    Ok((
        StatusCode::CREATED,
        Json(InventoryItemResponse::new(item, Utc::now())),
    ))
}

/// PUT /api/inventory/{id}
///
/// Merge the supplied fields into the item and bump `updated_at`.
pub async fn update_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateItemRequest>,
) -> AppResult<Json<InventoryItemResponse>> {
    let update_dto = validate_update(input)?;
    let item = InventoryRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InventoryItem",
            id,
        }))?;

    tracing::info!(
        item_id = item.id,
        quantity = item.quantity,
        updated_by = admin.user_id,
        "Inventory item updated"
    );

    Ok(Json(InventoryItemResponse::new(item, Utc::now())))
}

/// GET /api/inventory/export/excel?filter=<filter>
///
/// Download the (optionally filtered) inventory as an `.xlsx` workbook.
/// `filter` defaults to `all`.
pub async fn export_excel(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let filter: ExportFilter = match params.filter.as_deref() {
        None | Some("") => ExportFilter::All,
        Some(raw) => raw.parse()?,
    };

    let items = InventoryRepo::list(&state.pool).await?;
    let export = build_inventory_export(&items, filter, Utc::now(), &auth.full_name)
        .map_err(|e| AppError::InternalError(format!("Workbook generation error: {e}")))?;

    tracing::info!(
        filter = %filter,
        rows = export.row_count,
        user_id = auth.user_id,
        "Inventory exported"
    );

    let disposition = format!("attachment; filename={}", export.filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    ))
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_create(
    input: CreateItemRequest,
    added_by: &str,
) -> Result<CreateInventoryItem, CoreError> {
    validate_required_text("item_name", &input.item_name)?;
    validate_required_text("category", &input.category)?;
    validate_required_text("location", &input.location)?;
    for (field, value) in [
        ("manufacturer", &input.manufacturer),
        ("supplier", &input.supplier),
        ("model", &input.model),
        ("uom", &input.uom),
        ("catalogue_no", &input.catalogue_no),
        ("use_case", &input.use_case),
    ] {
        validate_text_length(field, value)?;
    }
    let sub_category = normalize_optional(input.sub_category);
    if let Some(sub) = &sub_category {
        validate_text_length("sub_category", sub)?;
    }

    Ok(CreateInventoryItem {
        quantity: input.quantity.into_count("quantity")?,
        target_stock_level: input.target_stock_level.into_count("target_stock_level")?,
        reorder_level: input.reorder_level.into_count("reorder_level")?,
        validity: match input.validity.as_deref() {
            Some(raw) => parse_validity(raw)?,
            None => None,
        },
        item_name: input.item_name.trim().to_string(),
        category: input.category.trim().to_string(),
        sub_category,
        location: input.location.trim().to_string(),
        manufacturer: input.manufacturer,
        supplier: input.supplier,
        model: input.model,
        uom: input.uom,
        catalogue_no: input.catalogue_no,
        use_case: input.use_case,
        added_by: added_by.to_string(),
    })
}

fn validate_update(input: UpdateItemRequest) -> Result<UpdateInventoryItem, CoreError> {
    for (field, value) in [
        ("item_name", &input.item_name),
        ("category", &input.category),
        ("location", &input.location),
    ] {
        if let Some(value) = value {
            validate_required_text(field, value)?;
        }
    }
    for (field, value) in [
        ("manufacturer", &input.manufacturer),
        ("supplier", &input.supplier),
        ("model", &input.model),
        ("uom", &input.uom),
        ("catalogue_no", &input.catalogue_no),
        ("use_case", &input.use_case),
    ] {
        if let Some(value) = value {
            validate_text_length(field, value)?;
        }
    }
    let sub_category = input.sub_category.map(normalize_optional);
    if let Some(Some(sub)) = &sub_category {
        validate_text_length("sub_category", sub)?;
    }

    let count = |field: &str, value: Option<StockInput>| -> Result<Option<i32>, CoreError> {
        value.map(|v| v.into_count(field)).transpose()
    };

    Ok(UpdateInventoryItem {
        quantity: count("quantity", input.quantity)?,
        target_stock_level: count("target_stock_level", input.target_stock_level)?,
        reorder_level: count("reorder_level", input.reorder_level)?,
        validity: match input.validity {
            Some(Some(raw)) => Some(parse_validity(&raw)?),
            Some(None) => Some(None),
            None => None,
        },
        item_name: input.item_name.map(|s| s.trim().to_string()),
        category: input.category.map(|s| s.trim().to_string()),
        sub_category,
        location: input.location.map(|s| s.trim().to_string()),
        manufacturer: input.manufacturer,
        supplier: input.supplier,
        model: input.model,
        uom: input.uom,
        catalogue_no: input.catalogue_no,
        use_case: input.use_case,
    })
}

/// Treat a blank optional string as absent.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
