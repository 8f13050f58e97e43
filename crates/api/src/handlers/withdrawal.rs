//! Handlers for the `/withdrawal-requests` resource.
//!
//! Any authenticated user can file a request; only admins can decide one.
//! Stock is checked and decremented at approval time, never at creation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labstock_core::error::CoreError;
use labstock_core::types::DbId;
use labstock_core::withdrawal::{
    insufficient_stock, transition, validate_comment, validate_purpose,
    validate_requested_quantity, ProcessAction,
};
use labstock_db::models::withdrawal_request::{
    ApprovalOutcome, CreateWithdrawalRequest, WithdrawalRequest,
};
use labstock_db::repositories::{InventoryRepo, WithdrawalRequestRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /withdrawal-requests`.
#[derive(Debug, Deserialize)]
pub struct CreateRequestBody {
    pub item_id: DbId,
    pub requested_quantity: i64,
    pub purpose: String,
}

/// Request body for `POST /withdrawal-requests/process`.
#[derive(Debug, Deserialize)]
pub struct ProcessRequestBody {
    pub request_id: DbId,
    /// `"approve"` or `"reject"`.
    pub action: String,
    pub comments: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/withdrawal-requests
///
/// Admins see every request; users see only their own. Newest first.
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<WithdrawalRequest>>> {
    let requests = if auth.is_admin() {
        WithdrawalRequestRepo::list_all(&state.pool).await?
    } else {
        WithdrawalRequestRepo::list_for_requester(&state.pool, auth.user_id).await?
    };
    Ok(Json(requests))
}

/// POST /api/withdrawal-requests
///
/// File a pending request against an existing item.
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateRequestBody>,
) -> AppResult<(StatusCode, Json<WithdrawalRequest>)> {
    let requested_quantity = validate_requested_quantity(input.requested_quantity)?;
    validate_purpose(&input.purpose)?;

    let item = InventoryRepo::find_by_id(&state.pool, input.item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InventoryItem",
            id: input.item_id,
        }))?;

    let create_dto = CreateWithdrawalRequest {
        item_id: item.id,
        item_name: item.item_name,
        requested_quantity,
        purpose: input.purpose.trim().to_string(),
        requested_by: auth.user_id,
        requested_by_name: auth.full_name,
    };
    let request = WithdrawalRequestRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        request_id = request.id,
        item_id = request.item_id,
        requested = request.requested_quantity,
        requested_by = request.requested_by,
        "Withdrawal request created"
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// POST /api/withdrawal-requests/process
///
/// Approve or reject a pending request. Approval decrements the item's stock
/// in the same transaction; if the item is gone or holds too little stock,
/// nothing changes and the request stays pending.
pub async fn process_request(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<ProcessRequestBody>,
) -> AppResult<Json<WithdrawalRequest>> {
    let action: ProcessAction = input.action.parse()?;
    let comments = input.comments.as_deref().map(str::trim).filter(|c| !c.is_empty());
    validate_comment(comments)?;

    let existing = WithdrawalRequestRepo::find_by_id(&state.pool, input.request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WithdrawalRequest",
            id: input.request_id,
        }))?;
    transition(existing.status()?, action)?;

    let processed = match action {
        ProcessAction::Reject => {
            WithdrawalRequestRepo::reject(&state.pool, existing.id, admin.user_id, comments)
                .await?
                .ok_or_else(|| already_processed(existing.id))?
        }
        ProcessAction::Approve => {
            match WithdrawalRequestRepo::approve(&state.pool, existing.id, admin.user_id, comments)
                .await?
            {
                ApprovalOutcome::Approved { request, .. } => request,
                ApprovalOutcome::NotPending => return Err(already_processed(existing.id)),
                ApprovalOutcome::ItemMissing { item_id } => {
                    return Err(AppError::Core(CoreError::NotFound {
                        entity: "InventoryItem",
                        id: item_id,
                    }));
                }
                ApprovalOutcome::InsufficientStock {
                    available,
                    requested,
                } => return Err(insufficient_stock(available, requested).into()),
            }
        }
    };

    tracing::info!(
        request_id = processed.id,
        action = action.as_str(),
        processed_by = admin.user_id,
        "Withdrawal request processed"
    );

    Ok(Json(processed))
}

/// The request was decided by someone else between our read and our write.
fn already_processed(request_id: DbId) -> AppError {
    tracing::debug!(request_id, "Lost race to process withdrawal request");
    AppError::Core(CoreError::InvalidState("Request already processed".into()))
}
