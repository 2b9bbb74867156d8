use std::sync::Arc;

use reelflow_core::WorkflowEngine;
use reelflow_db::{PgContentStore, PgPersonDirectory};
use reelflow_events::{BusNotifier, EventBus};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reelflow_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Workflow engine wired to Postgres and the event bus.
    pub engine: Arc<WorkflowEngine>,
    /// Centralized event bus for workflow events.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Wire the engine's collaborators over `pool` and `event_bus`.
    pub fn new(
        pool: reelflow_db::DbPool,
        config: Arc<ServerConfig>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let engine = WorkflowEngine::new(
            Arc::new(PgContentStore::new(pool.clone())),
            Arc::new(PgPersonDirectory::new(pool.clone())),
            Arc::new(BusNotifier::new(Arc::clone(&event_bus))),
            config.policy,
        );
        Self {
            pool,
            config,
            engine: Arc::new(engine),
            event_bus,
        }
    }
}
