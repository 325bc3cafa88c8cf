use std::sync::Arc;

use rentdesk_db::DbPool;

use crate::config::ServerConfig;

/// Handles every request needs, cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}
