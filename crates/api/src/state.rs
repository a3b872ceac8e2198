use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. The store handle is injected here instead of living
/// in process-wide state; tests construct their own.
///
/// Cheaply cloneable (the pool is already a handle, config is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: multiverse_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
