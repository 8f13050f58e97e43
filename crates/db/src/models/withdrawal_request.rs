//! Withdrawal request entity model and DTOs.

use labstock_core::error::CoreError;
use labstock_core::types::{DbId, Timestamp};
use labstock_core::withdrawal::RequestStatus;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `withdrawal_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WithdrawalRequest {
    pub id: DbId,
    pub item_id: DbId,
    /// Item name at the time the request was made.
    pub item_name: String,
    pub requested_quantity: i32,
    pub purpose: String,
    pub requested_by: DbId,
    pub requested_by_name: String,
    pub status: String,
    pub admin_comments: Option<String>,
    pub processed_by: Option<DbId>,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl WithdrawalRequest {
    /// Parse the stored status text.
    pub fn status(&self) -> Result<RequestStatus, CoreError> {
        self.status.parse()
    }
}

/// DTO for inserting a new pending request.
#[derive(Debug, Clone)]
pub struct CreateWithdrawalRequest {
    pub item_id: DbId,
    pub item_name: String,
    pub requested_quantity: i32,
    pub purpose: String,
    pub requested_by: DbId,
    pub requested_by_name: String,
}

/// Result of attempting to approve a request.
///
/// Every non-`Approved` outcome leaves both the request and the item untouched.
#[derive(Debug, Clone)]
pub enum ApprovalOutcome {
    /// The request was approved and the item decremented.
    Approved {
        request: WithdrawalRequest,
        remaining_quantity: i32,
    },
    /// No pending request with that id (already decided, or never existed).
    NotPending,
    /// The referenced item no longer exists.
    ItemMissing { item_id: DbId },
    /// The item holds less stock than requested.
    InsufficientStock { available: i32, requested: i32 },
}
