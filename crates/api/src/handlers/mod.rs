pub mod auth;
pub mod dashboard;
pub mod email_config;
pub mod inventory;
pub mod users;
pub mod withdrawal;
