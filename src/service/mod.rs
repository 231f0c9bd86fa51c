//! Service layer: business logic orchestration.
//!
//! [`HistoryService`] validates incoming pages, folds them into per-feed
//! histories through the reconciliation engine, and emits notices through
//! the [`super::domain::EventBus`].

pub mod history_service;

pub use history_service::{HistoryService, IngestReport, PageLimits};
