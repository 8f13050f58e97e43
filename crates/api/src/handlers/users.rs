//! Handlers for account management.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labstock_core::error::CoreError;
use labstock_core::roles::validate_role;
use labstock_core::types::DbId;
use labstock_core::users::{validate_email, validate_employee_number, validate_profile};
use labstock_db::models::user::{CreateUser, UserResponse};
use labstock_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub employee_number: String,
    pub section: String,
    pub role: String,
    pub email: String,
    pub password: String,
}

/// POST /api/register
///
/// Create a new account. Returns the safe [`UserResponse`] with 201 Created.
/// A duplicate employee number is rejected with 409 by the unique constraint.
pub async fn register(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let employee_number = input.employee_number.trim().to_string();
    validate_employee_number(&employee_number)?;
    validate_profile(&input.full_name, &input.section)?;
    validate_role(&input.role)?;
    validate_email(input.email.trim())?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        employee_number,
        full_name: input.full_name.trim().to_string(),
        section: input.section.trim().to_string(),
        role: input.role,
        email: input.email.trim().to_string(),
        password_hash,
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        user_id = user.id,
        employee_number = %user.employee_number,
        role = %user.role,
        created_by = admin.user_id,
        "User registered"
    );

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/users
///
/// List all accounts, newest first.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// DELETE /api/users/{id}
///
/// Delete an account. Admins cannot delete themselves.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest("Cannot delete your own account".into()));
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
