//! Service status.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use espetinho_db::MigrationStatus;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseStatus,
}

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations: Option<MigrationStatus>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/status", get(status))
}

/// GET /api/status
///
/// Always answers 200; a broken database shows up as `"degraded"`.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let healthy = state.db.health_check().await;
    let migrations = if healthy {
        state.db.migration_status().await.ok()
    } else {
        warn!("Database health check failed");
        None
    };

    let current = migrations.as_ref().is_some_and(MigrationStatus::is_current);

    Json(StatusResponse {
        status: if healthy && current { "ok" } else { "degraded" },
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        database: DatabaseStatus { healthy, migrations },
    })
}
