pub mod auth;
pub mod dashboard;
pub mod email_config;
pub mod health;
pub mod inventory;
pub mod users;
pub mod withdrawal;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                    login (public)
/// /profile                                  current user
///
/// /register                                 create account (admin only)
/// /users                                    list accounts (admin only)
/// /users/{id}                               delete account (admin only)
///
/// /inventory                                list, create (create: admin only)
/// /inventory/{id}                           get, update (update: admin only)
/// /inventory/export/excel                   xlsx download (?filter=)
///
/// /withdrawal-requests                      list, create
/// /withdrawal-requests/process              approve / reject (admin only)
///
/// /dashboard/stats                          inventory and request counts
/// /dashboard/category-stats                 per-category totals
/// /dashboard/low-stock-items                items at or below reorder level
/// /dashboard/expiring-items                 items expiring within 30 days
///
/// /email-config                             list, create (admin only)
/// /email-config/{id}                        delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Login and profile.
        .merge(auth::router())
        // Account management.
        .merge(users::router())
        .nest("/inventory", inventory::router())
        .nest("/withdrawal-requests", withdrawal::router())
        .nest("/dashboard", dashboard::router())
        // Stock-alert recipients.
        .nest("/email-config", email_config::router())
}
