//! First-run admin account seeding.
//!
//! A fresh database has no users, and only admins can register accounts.
//! When `ADMIN_BOOTSTRAP_PASSWORD` is set, startup creates the initial admin
//! unless an account with the bootstrap employee number already exists.

use labstock_core::error::CoreError;
use labstock_core::roles::ROLE_ADMIN;
use labstock_db::models::user::{CreateUser, User};
use labstock_db::repositories::UserRepo;
use labstock_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};

const DEFAULT_EMPLOYEE_NUMBER: &str = "ADMIN001";
const BOOTSTRAP_FULL_NAME: &str = "System Administrator";
const BOOTSTRAP_SECTION: &str = "IT Administration";
const BOOTSTRAP_EMAIL: &str = "admin@localhost";

/// Bootstrap admin settings.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub employee_number: String,
    /// `None` disables seeding.
    pub password: Option<String>,
}

impl BootstrapConfig {
    /// Load bootstrap settings from environment variables.
    ///
    /// | Env Var                           | Default    |
    /// |-----------------------------------|------------|
    /// | `ADMIN_BOOTSTRAP_EMPLOYEE_NUMBER` | `ADMIN001` |
    /// | `ADMIN_BOOTSTRAP_PASSWORD`        | unset      |
    pub fn from_env() -> Self {
        let employee_number = std::env::var("ADMIN_BOOTSTRAP_EMPLOYEE_NUMBER")
            .unwrap_or_else(|_| DEFAULT_EMPLOYEE_NUMBER.into());
        let password = std::env::var("ADMIN_BOOTSTRAP_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        Self {
            employee_number,
            password,
        }
    }

    /// Seeding disabled.
    pub fn disabled() -> Self {
        Self {
            employee_number: DEFAULT_EMPLOYEE_NUMBER.into(),
            password: None,
        }
    }
}

/// Create the bootstrap admin if configured and missing.
///
/// Returns the newly created user, or `None` when seeding is disabled or the
/// account already exists.
pub async fn ensure_admin(pool: &DbPool, config: &BootstrapConfig) -> AppResult<Option<User>> {
    let Some(password) = config.password.as_deref() else {
        tracing::debug!("Admin bootstrap disabled");
        return Ok(None);
    };

    if UserRepo::find_by_employee_number(pool, &config.employee_number)
        .await?
        .is_some()
    {
        tracing::debug!(employee_number = %config.employee_number, "Bootstrap admin already exists");
        return Ok(None);
    }

    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            employee_number: config.employee_number.clone(),
            full_name: BOOTSTRAP_FULL_NAME.into(),
            section: BOOTSTRAP_SECTION.into(),
            role: ROLE_ADMIN.into(),
            email: BOOTSTRAP_EMAIL.into(),
            password_hash,
        },
    )
    .await?;

    tracing::warn!(
        user_id = user.id,
        employee_number = %user.employee_number,
        "Created bootstrap admin account"
    );
    Ok(Some(user))
}
