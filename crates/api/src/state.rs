use std::sync::Arc;

use rpgdash_core::EntityStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by permission editing and
    /// the health check.
    pub pool: rpgdash_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Read side for leaderboards and profiles.
    pub store: Arc<dyn EntityStore>,
}
