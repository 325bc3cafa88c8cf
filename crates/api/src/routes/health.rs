//! Liveness probe, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when any probe below failed.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub uploads_healthy: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}

async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = rentdesk_db::health_check(&state.pool).await.is_ok();
    let uploads_healthy = match tokio::fs::metadata(&state.config.upload_dir).await {
        Ok(meta) => meta.is_dir(),
        Err(_) => false,
    };

    Json(HealthReport {
        status: if db_healthy && uploads_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_healthy,
    })
}
