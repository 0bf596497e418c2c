use std::sync::Arc;

use dispatch_assignment::Services;
use dispatch_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and services are handles, the rest is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: dispatch_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Domain events published after commit.
    pub event_bus: Arc<EventBus>,
    pub services: Services,
}
