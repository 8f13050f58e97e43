//! Domain logic for the laboratory stock service.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! call into these modules for validation, classification and state
//! transitions so the rules live in exactly one place.

pub mod error;
pub mod inventory;
pub mod roles;
pub mod types;
pub mod users;
pub mod withdrawal;
