//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the entity is editable

pub mod dashboard;
pub mod email_config;
pub mod inventory;
pub mod user;
pub mod withdrawal_request;
