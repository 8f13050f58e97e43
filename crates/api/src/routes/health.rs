//! Liveness and readiness report, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use labstock_db::MigrationStatus;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database is reachable and fully migrated, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `None` when the database could not be queried.
    pub migrations: Option<MigrationStatus>,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let migrations = match labstock_db::migration_status(&state.pool).await {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = migrations.is_some();
    let ready = migrations.is_some_and(|m| m.is_current());

    Json(HealthResponse {
        status: if ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        migrations,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
