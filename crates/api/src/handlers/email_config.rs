//! Handlers for the `/email-config` resource (stock-alert recipients).
//!
//! Addresses are stored for alerting; nothing is sent from this service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labstock_core::error::CoreError;
use labstock_core::types::DbId;
use labstock_core::users::validate_email;
use labstock_db::models::email_config::{CreateEmailConfig, EmailConfig};
use labstock_db::repositories::EmailConfigRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /email-config`.
#[derive(Debug, Deserialize)]
pub struct CreateEmailConfigRequest {
    pub email: String,
}

/// POST /api/email-config
pub async fn create_email_config(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateEmailConfigRequest>,
) -> AppResult<(StatusCode, Json<EmailConfig>)> {
    let email = input.email.trim().to_string();
    validate_email(&email)?;

    let config = EmailConfigRepo::create(
        &state.pool,
        &CreateEmailConfig {
            email,
            added_by: admin.employee_number,
        },
    )
    .await?;

    tracing::info!(email_config_id = config.id, "Alert recipient added");
    Ok((StatusCode::CREATED, Json(config)))
}

/// GET /api/email-config
///
/// Active recipients, oldest first.
pub async fn list_email_configs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<EmailConfig>>> {
    let configs = EmailConfigRepo::list_active(&state.pool).await?;
    Ok(Json(configs))
}

/// DELETE /api/email-config/{id}
pub async fn delete_email_config(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EmailConfigRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "EmailConfig",
            id,
        }));
    }

    tracing::info!(email_config_id = id, "Alert recipient removed");
    Ok(StatusCode::NO_CONTENT)
}
