use std::sync::Arc;

use parish_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: parish_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Handlers publish here after their database work commits.
    pub event_bus: Arc<EventBus>,
}
