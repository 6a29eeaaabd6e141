use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted internally and the rest
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: biohub_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Publishes species refresh/created events to listings.
    pub event_bus: Arc<biohub_events::EventBus>,
}
