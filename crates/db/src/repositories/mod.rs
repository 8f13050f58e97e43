//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dashboard_repo;
pub mod email_config_repo;
pub mod inventory_repo;
pub mod user_repo;
pub mod withdrawal_request_repo;

pub use dashboard_repo::DashboardRepo;
pub use email_config_repo::EmailConfigRepo;
pub use inventory_repo::InventoryRepo;
pub use user_repo::UserRepo;
pub use withdrawal_request_repo::WithdrawalRequestRepo;
