use std::sync::Arc;

use playerdesk_core::assignment::JobAssignmentService;
use playerdesk_core::job::JobCatalog;
use playerdesk_core::logs::EventLog;
use playerdesk_core::player::PlayerDirectory;
use playerdesk_core::store::StoreHandle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (log ingestion secret, timeouts).
    pub config: Arc<ServerConfig>,
    /// Timeout-bounded store access, also used directly by the health check.
    pub store: StoreHandle,
    pub directory: PlayerDirectory,
    pub catalog: JobCatalog,
    pub assignments: JobAssignmentService,
    pub event_log: EventLog,
}

impl AppState {
    /// Wire every service to the same store handle.
    pub fn new(store: StoreHandle, config: Arc<ServerConfig>) -> Self {
        let catalog = JobCatalog::new(store.clone());
        Self {
            config,
            directory: PlayerDirectory::new(store.clone()),
            assignments: JobAssignmentService::new(store.clone(), catalog.clone()),
            event_log: EventLog::new(store.clone()),
            catalog,
            store,
        }
    }
}
