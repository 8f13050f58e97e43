//! Repository for the `email_configs` table.

use labstock_core::types::DbId;
use sqlx::PgPool;

use crate::models::email_config::{CreateEmailConfig, EmailConfig};

const COLUMNS: &str = "id, email, is_active, added_by, created_at";

/// Provides CRUD operations for stock-alert recipients.
pub struct EmailConfigRepo;

impl EmailConfigRepo {
    /// Register a recipient, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmailConfig,
    ) -> Result<EmailConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_configs (email, added_by)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailConfig>(&query)
            .bind(&input.email)
            .bind(&input.added_by)
            .fetch_one(pool)
            .await
    }

    /// List active recipients, oldest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<EmailConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM email_configs WHERE is_active = true ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, EmailConfig>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a recipient. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM email_configs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
