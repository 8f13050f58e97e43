//! Repository for the `withdrawal_requests` table.
//!
//! Decisions are applied with conditional updates (`WHERE status = 'pending'`)
//! so a request can be decided at most once even under concurrent admins.
//! Approval claims the request and decrements stock inside one transaction;
//! the decrement is guarded by `quantity >= requested_quantity`, so stock can
//! never go negative and concurrent approvals on the same item serialize on
//! the item's row lock.

use labstock_core::types::DbId;
use labstock_core::withdrawal::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};
use sqlx::PgPool;

use crate::models::withdrawal_request::{
    ApprovalOutcome, CreateWithdrawalRequest, WithdrawalRequest,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, item_id, item_name, requested_quantity, purpose, requested_by, \
                       requested_by_name, status, admin_comments, processed_by, \
                       processed_at, created_at";

/// Provides CRUD and decision operations for withdrawal requests.
pub struct WithdrawalRequestRepo;

impl WithdrawalRequestRepo {
    /// Insert a new pending request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWithdrawalRequest,
    ) -> Result<WithdrawalRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO withdrawal_requests
                (item_id, item_name, requested_quantity, purpose, requested_by,
                 requested_by_name, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WithdrawalRequest>(&query)
            .bind(input.item_id)
            .bind(&input.item_name)
            .bind(input.requested_quantity)
            .bind(&input.purpose)
            .bind(input.requested_by)
            .bind(&input.requested_by_name)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WithdrawalRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM withdrawal_requests WHERE id = $1");
        sqlx::query_as::<_, WithdrawalRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every request, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<WithdrawalRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM withdrawal_requests ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, WithdrawalRequest>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the requests made by one user, newest first.
    pub async fn list_for_requester(
        pool: &PgPool,
        requested_by: DbId,
    ) -> Result<Vec<WithdrawalRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM withdrawal_requests
             WHERE requested_by = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, WithdrawalRequest>(&query)
            .bind(requested_by)
            .fetch_all(pool)
            .await
    }

    /// Count requests still awaiting a decision.
    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM withdrawal_requests WHERE status = $1")
                .bind(STATUS_PENDING)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Reject a pending request. Inventory is not touched.
    ///
    /// Returns `None` if the request does not exist or is no longer pending.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        processed_by: DbId,
        comments: Option<&str>,
    ) -> Result<Option<WithdrawalRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE withdrawal_requests SET
                status = $2,
                processed_by = $3,
                processed_at = NOW(),
                admin_comments = $4
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WithdrawalRequest>(&query)
            .bind(id)
            .bind(STATUS_REJECTED)
            .bind(processed_by)
            .bind(comments)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Approve a pending request and decrement the item's stock atomically.
    ///
    /// Either both writes commit or neither does; see [`ApprovalOutcome`].
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        processed_by: DbId,
        comments: Option<&str>,
    ) -> Result<ApprovalOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Claim the request first: the row lock makes a concurrent decision on
        // the same request wait, then see a non-pending status.
        let query = format!(
            "UPDATE withdrawal_requests SET
                status = $2,
                processed_by = $3,
                processed_at = NOW(),
                admin_comments = $4
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        let claimed = sqlx::query_as::<_, WithdrawalRequest>(&query)
            .bind(id)
            .bind(STATUS_APPROVED)
            .bind(processed_by)
            .bind(comments)
            .bind(STATUS_PENDING)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(request) = claimed else {
            tx.rollback().await?;
            return Ok(ApprovalOutcome::NotPending);
        };

        let decremented: Option<(i32,)> = sqlx::query_as(
            "UPDATE inventory_items SET
                quantity = quantity - $2,
                updated_at = NOW()
             WHERE id = $1 AND quantity >= $2
             RETURNING quantity",
        )
        .bind(request.item_id)
        .bind(request.requested_quantity)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((remaining_quantity,)) = decremented {
            tx.commit().await?;
            tracing::info!(
                request_id = request.id,
                item_id = request.item_id,
                requested = request.requested_quantity,
                remaining = remaining_quantity,
                "Withdrawal approved, stock decremented"
            );
            return Ok(ApprovalOutcome::Approved {
                request,
                remaining_quantity,
            });
        }

        let available: Option<(i32,)> =
            sqlx::query_as("SELECT quantity FROM inventory_items WHERE id = $1")
                .bind(request.item_id)
                .fetch_optional(&mut *tx)
                .await?;
        tx.rollback().await?;

        Ok(match available {
            Some((available,)) => ApprovalOutcome::InsufficientStock {
                available,
                requested: request.requested_quantity,
            },
            None => ApprovalOutcome::ItemMissing {
                item_id: request.item_id,
            },
        })
    }
}
