//! Stock-alert email recipient model.

use labstock_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `email_configs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmailConfig {
    pub id: DbId,
    pub email: String,
    pub is_active: bool,
    /// Employee number of the admin who registered the address.
    pub added_by: String,
    pub created_at: Timestamp,
}

/// DTO for registering a new recipient.
#[derive(Debug, Clone)]
pub struct CreateEmailConfig {
    pub email: String,
    pub added_by: String,
}
