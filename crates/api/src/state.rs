use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Each server instance owns its own state, so tests can run several isolated
/// apps side by side.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cinelog_db::DbPool,
    /// Server configuration (token secret and lifetime are read by the
    /// credential verifier and the access gate).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: cinelog_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
