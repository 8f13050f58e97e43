//! User entity model and DTOs.

use labstock_core::roles::ROLE_ADMIN;
use labstock_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub employee_number: String,
    pub full_name: String,
    pub section: String,
    pub role: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub employee_number: String,
    pub full_name: String,
    pub section: String,
    pub role: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            employee_number: user.employee_number.clone(),
            full_name: user.full_name.clone(),
            section: user.section.clone(),
            role: user.role.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub employee_number: String,
    pub full_name: String,
    pub section: String,
    pub role: String,
    pub email: String,
    pub password_hash: String,
}
