//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::HistoryService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// History service for all business logic.
    pub history_service: Arc<HistoryService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds state around a service, sharing its event bus.
    #[must_use]
    pub fn new(history_service: Arc<HistoryService>) -> Self {
        let event_bus = history_service.event_bus().clone();
        Self {
            history_service,
            event_bus,
        }
    }
}
